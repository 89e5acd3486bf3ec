//! Round Tally Core Library
//!
//! This library provides the core functionality for round tallying:
//! - Exit codes for CLI operations
//! - Append-only JSONL ledger store
//! - Run segmentation and aggregate statistics
//! - Streak alert evaluation and arming state
//! - Notification dispatch and engine events
//!
//! The binary entry point is in `main.rs`.

pub mod aggregate;
pub mod alert;
pub mod engine;
pub mod events;
pub mod exit_codes;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod segment;
pub mod state;
pub mod summary;
