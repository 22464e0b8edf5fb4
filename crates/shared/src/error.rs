//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation before reaching the aggregator.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity or file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot could not be read or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    ///
    /// Codes follow the BSD `sysexits.h` convention.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 65,
            Self::NotFound(_) => 66,
            Self::Snapshot(_) => 74,
            Self::Config(_) => 78,
            Self::Internal(_) => 70,
        }
    }

    /// Returns the stable error code used in structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Snapshot(_) => "SNAPSHOT_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
