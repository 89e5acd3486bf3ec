//! Fuzz target for ledger line parsing.
//!
//! Tests that deserializing one JSONL ledger line from arbitrary bytes
//! never panics, only returns an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rt_common::Round;

fuzz_target!(|data: &[u8]| {
    // Malformed lines must surface as errors, never as panics
    let _ = serde_json::from_slice::<Round>(data);
});
