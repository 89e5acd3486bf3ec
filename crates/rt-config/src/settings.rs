//! Settings document types.
//!
//! The settings file is a single JSON document with a `schema_version`
//! field and one section per concern. Unknown fields are tolerated and
//! every field has a default, so a partial document is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::validate::{ValidationError, ValidationResult};

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

fn default_threshold() -> u32 {
    4
}

fn default_notify_summary() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    6
}

/// Complete settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub alert: AlertSettings,

    #[serde(default)]
    pub ledger: LedgerSettings,

    #[serde(default)]
    pub notify: NotifySettings,
}

/// Streak alert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSettings {
    /// Run length at which a streak alert fires. Minimum 1.
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Whether to dispatch the snapshot summary after every append.
    #[serde(default = "default_notify_summary")]
    pub notify_summary: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        AlertSettings {
            threshold: default_threshold(),
            notify_summary: default_notify_summary(),
        }
    }
}

/// Ledger storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Path of the JSONL ledger file. Defaults to
    /// `<data_dir>/round-tally/rounds.jsonl` when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LedgerSettings {
    /// The ledger path, falling back to the standard data directory.
    pub fn effective_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| crate::resolve::default_data_dir().join("rounds.jsonl"))
    }
}

/// Notifier transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifySettings {
    /// Webhook endpoint to POST alert and summary texts to. Dispatch is
    /// disabled when unset.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Request timeout in seconds, 1..=300.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotifySettings {
    fn default() -> Self {
        NotifySettings {
            webhook_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            schema_version: default_schema_version(),
            description: None,
            alert: AlertSettings::default(),
            ledger: LedgerSettings::default(),
            notify: NotifySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Settings> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ValidationError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Render the document as pretty JSON (used by `config init`).
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, crate::CONFIG_SCHEMA_VERSION);
        assert_eq!(settings.alert.threshold, 4);
        assert!(settings.alert.notify_summary);
        assert_eq!(settings.notify.timeout_secs, 6);
        assert!(settings.notify.webhook_url.is_none());
        assert!(settings.ledger.path.is_none());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"alert": {"threshold": 6}}"#).unwrap();
        assert_eq!(settings.alert.threshold, 6);
        assert!(settings.alert.notify_summary);
        assert_eq!(settings.schema_version, crate::CONFIG_SCHEMA_VERSION);
        assert_eq!(settings.notify.timeout_secs, 6);
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        let settings: Settings =
            serde_json::from_str(r#"{"schema_version": "1.0.0", "future_section": {"x": 1}}"#)
                .unwrap();
        assert_eq!(settings.alert.threshold, 4);
    }

    #[test]
    fn test_effective_ledger_path_prefers_explicit() {
        let settings: Settings =
            serde_json::from_str(r#"{"ledger": {"path": "/tmp/rt/rounds.jsonl"}}"#).unwrap();
        assert_eq!(
            settings.ledger.effective_path(),
            PathBuf::from("/tmp/rt/rounds.jsonl")
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings::default();
        let json = settings.to_json_pretty();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.alert.threshold, settings.alert.threshold);
        assert_eq!(parsed.notify.timeout_secs, settings.notify.timeout_secs);
    }
}
