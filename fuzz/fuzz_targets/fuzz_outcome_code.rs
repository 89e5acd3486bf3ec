//! Fuzz target for outcome code parsing.
//!
//! Tests that the outcome validation boundary handles arbitrary text
//! without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rt_common::Outcome;

fuzz_target!(|data: &str| {
    // Unknown codes are rejected, never coerced and never a panic
    let _ = Outcome::parse(data);
});
