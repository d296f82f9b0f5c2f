//! Error types and handling.

use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Document store operation failed
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write completed without the expected acknowledgement
    #[error("Unacknowledged write: {0}")]
    Unacknowledged(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an unacknowledged-write error with message
    pub fn unacknowledged(msg: impl Into<String>) -> Self {
        Self::Unacknowledged(msg.into())
    }

    /// Classification carried on every error envelope.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::BadInput,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Database(_) | Self::Config(_) | Self::Unacknowledged(_) => ErrorCode::Internal,
        }
    }
}

/// Wire-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// Caller-supplied data failed validation; never retried.
    #[serde(rename = "BAD_INPUT")]
    BadInput,
    /// Referenced entity does not exist.
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    /// Unexpected data-layer failure; detail stays server-side.
    #[serde(rename = "INTERNAL")]
    Internal,
}

impl ErrorCode {
    /// Wire form of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadInput => "BAD_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
