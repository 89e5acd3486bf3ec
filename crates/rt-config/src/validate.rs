//! Settings validation errors and semantic validation.

use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Settings validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 62,
            ValidationError::InvalidValue { .. } => 63,
            ValidationError::VersionMismatch { .. } => 64,
        }
    }
}

/// Validate a settings document semantically.
pub fn validate_settings(settings: &crate::settings::Settings) -> ValidationResult<()> {
    // Check schema version
    if settings.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: settings.schema_version.clone(),
        });
    }

    // A threshold of 0 would fire on every append, including length-0
    // tails; the alert contract starts at 1.
    if settings.alert.threshold < 1 {
        return Err(ValidationError::InvalidValue {
            field: "alert.threshold".to_string(),
            message: format!("must be >= 1, got {}", settings.alert.threshold),
        });
    }

    if settings.notify.timeout_secs < 1 || settings.notify.timeout_secs > 300 {
        return Err(ValidationError::InvalidValue {
            field: "notify.timeout_secs".to_string(),
            message: format!("must be in 1..=300, got {}", settings.notify.timeout_secs),
        });
    }

    if let Some(url) = &settings.notify.webhook_url {
        if url.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "notify.webhook_url".to_string(),
                message: "must not be empty when set".to_string(),
            });
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidValue {
                field: "notify.webhook_url".to_string(),
                message: format!("must be an http(s) URL, got {:?}", url),
            });
        }
    }

    if let Some(path) = &settings.ledger.path {
        if path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "ledger.path".to_string(),
                message: "must not be empty when set".to_string(),
            });
        }
    }

    Ok(())
}
