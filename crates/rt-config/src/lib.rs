//! Round Tally settings loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the config.json settings document
//! - Settings resolution (CLI → env → XDG → system → defaults)
//! - Schema and semantic validation

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_settings, ConfigSource, SettingsPaths};
pub use settings::{AlertSettings, LedgerSettings, NotifySettings, Settings};
pub use validate::{validate_settings, ValidationError, ValidationResult};

use std::path::Path;

/// Schema version for the settings document.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Resolve, load, and validate settings in one step.
///
/// An explicit CLI path that does not exist is an error; everywhere else a
/// missing file falls through to the next source and ultimately to the
/// built-in defaults.
pub fn load_settings(cli_path: Option<&Path>) -> ValidationResult<(Settings, SettingsPaths)> {
    let paths = resolve_settings(cli_path);

    let settings = match &paths.settings {
        Some(path) => {
            if !path.exists() {
                return Err(ValidationError::IoError(format!(
                    "settings file not found: {}",
                    path.display()
                )));
            }
            Settings::from_file(path)?
        }
        None => Settings::default(),
    };

    validate_settings(&settings)?;
    Ok((settings, paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_settings_explicit_missing_path_is_error() {
        let missing = Path::new("/nonexistent/round-tally/config.json");
        let err = load_settings(Some(missing)).unwrap_err();
        assert!(matches!(err, ValidationError::IoError(_)));
    }
}
