//! Round Tally common types, IDs, and errors.
//!
//! This crate provides foundational types shared across rt-core modules:
//! - The closed outcome alphabet and ledger entry type
//! - Sequence and session identifiers
//! - Common error types with stable codes
//! - Output format specifications

pub mod error;
pub mod id;
pub mod outcome;
pub mod output;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use id::{RoundSeq, SessionId};
pub use outcome::{Outcome, Round};
pub use output::OutputFormat;
