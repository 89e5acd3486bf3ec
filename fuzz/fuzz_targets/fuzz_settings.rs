//! Fuzz target for settings document parsing.
//!
//! Tests that parsing and validating a settings document from arbitrary
//! bytes never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rt_config::{validate_settings, Settings};

fuzz_target!(|data: &[u8]| {
    // Both the parse and the semantic validation must reject cleanly
    if let Ok(settings) = serde_json::from_slice::<Settings>(data) {
        let _ = validate_settings(&settings);
    }
});
