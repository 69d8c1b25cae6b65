//! Application-wide error types.
//!
//! Every domain error is mapped into `AppError` at the binary boundary, which
//! decides the process exit code and the stable error code that is logged.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected (over-receipt, empty return note, negative amount, unreadable file).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::BusinessRule(_) => 3,
            Self::NotFound(_) => 4,
            Self::Storage(_) => 5,
            Self::Configuration(_) => 6,
        }
    }

    /// Returns the stable error code reported alongside the message.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
