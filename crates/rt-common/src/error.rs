//! Error types for Round Tally.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! Errors can be formatted for human consumption with headline, reason, and fix:
//! ```text
//! ✗ Invalid Outcome
//!   Reason: unknown outcome code: "X"
//!   Fix: Valid outcomes are P/player, B/banker, T/tie (case-insensitive).
//! ```
//!
//! # Machine-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 30,
//!   "category": "ledger",
//!   "message": "ledger corrupted at rounds.jsonl:17: invalid JSON",
//!   "recoverable": false,
//!   "context": { "path": "rounds.jsonl", "line": 17 }
//! }
//! ```
//!
//! An empty ledger is never an error anywhere in this codebase; reads over
//! nothing produce well-defined empty values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Round Tally operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file errors (settings, schema).
    Config,
    /// Boundary validation errors (outcome codes, arguments).
    Validation,
    /// Ledger store errors (corruption, sequence violations).
    Ledger,
    /// Notifier construction/configuration errors.
    Notify,
    /// File I/O and serialization errors.
    Io,
    /// Internal invariant violations.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Ledger => write!(f, "ledger"),
            ErrorCategory::Notify => write!(f, "notify"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Unified error type for Round Tally.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("unsupported settings schema version: expected {expected}, found {found}")]
    SchemaVersion { expected: String, found: String },

    // Validation errors (20-29)
    #[error("unknown outcome code: {code:?}")]
    InvalidOutcome { code: String },

    // Ledger errors (30-39)
    #[error("ledger corrupted at {path}:{line}: {reason}")]
    LedgerCorrupted {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("ledger sequence regression: entry {found} after {last}")]
    SequenceRegression { last: u64, found: u64 },

    #[error("alert state file corrupted at {path}: {reason}")]
    StateCorrupted { path: String, reason: String },

    // Notifier errors (40-49)
    #[error("notifier configuration error: {0}")]
    Notify(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors (70-79)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Validation errors
    /// - 30-39: Ledger errors
    /// - 40-49: Notifier errors
    /// - 60-69: I/O errors
    /// - 70-79: Internal errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::ConfigNotFound { .. } => 11,
            Error::SchemaVersion { .. } => 12,
            Error::InvalidOutcome { .. } => 20,
            Error::LedgerCorrupted { .. } => 30,
            Error::SequenceRegression { .. } => 31,
            Error::StateCorrupted { .. } => 32,
            Error::Notify(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::Internal(_) => 70,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::ConfigNotFound { .. } | Error::SchemaVersion { .. } => {
                ErrorCategory::Config
            }

            Error::InvalidOutcome { .. } => ErrorCategory::Validation,

            Error::LedgerCorrupted { .. }
            | Error::SequenceRegression { .. }
            | Error::StateCorrupted { .. } => ErrorCategory::Ledger,

            Error::Notify(_) => ErrorCategory::Notify,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,

            Error::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// Recoverable errors may be resolved by correcting input, fixing
    /// configuration, or retrying; unrecoverable ones need manual repair.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Config errors: recoverable by fixing/resetting config
            Error::Config(_) => true,
            Error::ConfigNotFound { .. } => true,
            Error::SchemaVersion { .. } => true,

            // Validation: recoverable by correcting the input
            Error::InvalidOutcome { .. } => true,

            // Ledger data damage needs manual repair; the derived alert
            // state file can simply be deleted and rebuilt
            Error::LedgerCorrupted { .. } => false,
            Error::SequenceRegression { .. } => false,
            Error::StateCorrupted { .. } => true,

            Error::Notify(_) => true,

            // I/O: often transient
            Error::Io(_) => true,
            Error::Json(_) => true,

            Error::Internal(_) => false,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'rt-core check' to validate configuration, or 'rt-core config init' to write defaults."
            }
            Error::ConfigNotFound { .. } => {
                "Create the file with 'rt-core config init', or drop --config to use the default search path."
            }
            Error::SchemaVersion { .. } => {
                "Regenerate the settings file with 'rt-core config init' and re-apply local changes."
            }

            Error::InvalidOutcome { .. } => {
                "Valid outcomes are P/player, B/banker, T/tie (case-insensitive)."
            }

            Error::LedgerCorrupted { .. } => {
                "Inspect the named line of the ledger file; remove or fix the damaged entry, keeping order intact."
            }
            Error::SequenceRegression { .. } => {
                "The ledger file was edited or merged out of order. Restore it from backup; sequence ids must strictly increase."
            }
            Error::StateCorrupted { .. } => {
                "Delete the alert state file; it is derived data and will be rebuilt on the next append."
            }

            Error::Notify(_) => {
                "Check the notify section of the settings file; 'rt-core notify-test' exercises the configured transport."
            }

            Error::Io(_) => {
                "Check disk space, permissions, and that the data directory exists. Retry the operation."
            }
            Error::Json(_) => {
                "Invalid JSON in file. Check syntax with 'jq .' or restore from backup."
            }

            Error::Internal(_) => {
                "This is a bug. Re-run with -v and report the log output."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::ConfigNotFound { .. } => "Configuration File Not Found",
            Error::SchemaVersion { .. } => "Schema Version Mismatch",

            Error::InvalidOutcome { .. } => "Invalid Outcome",

            Error::LedgerCorrupted { .. } => "Ledger Corrupted",
            Error::SequenceRegression { .. } => "Ledger Sequence Regression",
            Error::StateCorrupted { .. } => "Alert State Corrupted",

            Error::Notify(_) => "Notifier Configuration Error",

            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",

            Error::Internal(_) => "Internal Error",
        }
    }
}

/// Structured error response for JSON output.
///
/// Used by `--format json` for machine-parseable error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., file path, line number).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        // Add error-specific context
        match err {
            Error::ConfigNotFound { path } => {
                context.insert("path".to_string(), serde_json::json!(path));
            }
            Error::SchemaVersion { expected, found } => {
                context.insert("expected".to_string(), serde_json::json!(expected));
                context.insert("found".to_string(), serde_json::json!(found));
            }
            Error::InvalidOutcome { code } => {
                context.insert("code".to_string(), serde_json::json!(code));
            }
            Error::LedgerCorrupted { path, line, .. } => {
                context.insert("path".to_string(), serde_json::json!(path));
                context.insert("line".to_string(), serde_json::json!(line));
            }
            Error::SequenceRegression { last, found } => {
                context.insert("last".to_string(), serde_json::json!(last));
                context.insert("found".to_string(), serde_json::json!(found));
            }
            Error::StateCorrupted { path, .. } => {
                context.insert("path".to_string(), serde_json::json!(path));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::Config("test".into()).code(), 10);
        assert_eq!(
            Error::InvalidOutcome { code: "X".into() }.code(),
            20
        );
        assert_eq!(
            Error::SequenceRegression { last: 5, found: 3 }.code(),
            31
        );
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::Config("test".into()).category(),
            ErrorCategory::Config
        );
        assert_eq!(
            Error::InvalidOutcome { code: "X".into() }.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            Error::LedgerCorrupted {
                path: "rounds.jsonl".into(),
                line: 3,
                reason: "bad json".into()
            }
            .category(),
            ErrorCategory::Ledger
        );
    }

    #[test]
    fn test_error_recoverable() {
        assert!(Error::Config("test".into()).is_recoverable());
        assert!(Error::InvalidOutcome { code: "X".into() }.is_recoverable());
        assert!(!Error::SequenceRegression { last: 5, found: 3 }.is_recoverable());
        assert!(!Error::Internal("bug".into()).is_recoverable());
    }

    #[test]
    fn test_structured_error_from_error() {
        let err = Error::LedgerCorrupted {
            path: "rounds.jsonl".into(),
            line: 17,
            reason: "invalid JSON".into(),
        };
        let structured = StructuredError::from(&err);

        assert_eq!(structured.code, 30);
        assert_eq!(structured.category, ErrorCategory::Ledger);
        assert!(!structured.recoverable);
        assert_eq!(
            structured.context.get("line"),
            Some(&serde_json::json!(17))
        );
    }

    #[test]
    fn test_structured_error_json() {
        let err = Error::InvalidOutcome { code: "X".into() };
        let structured = StructuredError::from(&err);
        let json = structured.to_json();

        assert!(json.contains(r#""code":20"#));
        assert!(json.contains(r#""category":"validation""#));
        assert!(json.contains(r#""recoverable":true"#));
    }

    #[test]
    fn test_format_error_human() {
        let err = Error::InvalidOutcome { code: "X".into() };
        let formatted = format_error_human(&err, false);

        assert!(formatted.contains("Invalid Outcome"));
        assert!(formatted.contains("unknown outcome code"));
        assert!(formatted.contains("case-insensitive"));
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Config.to_string(), "config");
        assert_eq!(ErrorCategory::Ledger.to_string(), "ledger");
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
    }
}
