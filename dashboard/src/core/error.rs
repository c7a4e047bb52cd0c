//! # Common Error Types
//!
//! Consolidated error handling for the dashboard.
//!
//! ## Error Categories
//!
//! - **Network**: the request never produced an HTTP response (DNS, refused, timeout)
//! - **Http**: the upstream answered with a non-success status
//! - **Decode**: the body was not JSON
//! - **Schema**: the JSON did not match the expected payload shape
//! - **Validation**: invalid input from the UI (page size, coin id)
//! - **Export**: CSV serialization or file write failures
//! - **State**: internal task failures
//!
//! Errors are `Clone` because one failed query is shown to every panel that
//! subscribes to it.
//!
//! ```rust
//! use dashboard::core::error::AppError;
//!
//! let err = AppError::Http { status: 429, message: "rate limited".to_string() };
//! assert!(err.is_retryable());
//! assert_eq!(err.to_string(), "HTTP 429: rate limited");
//! ```

use shared::SchemaError;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Transport failure before any response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the upstream API.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded as JSON.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Payload decoded but failed schema validation.
    #[error("Invalid payload: {0}")]
    Schema(#[from] SchemaError),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// CSV export failure.
    #[error("Export error: {0}")]
    Export(String),

    /// Application state or task failure.
    #[error("State error: {0}")]
    State(String),
}

impl AppError {
    /// Whether a bounded retry may succeed: transport errors, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Network(_) => true,
            AppError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Export(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(AppError::Network("timeout".into()).is_retryable());
        assert!(AppError::Http { status: 503, message: String::new() }.is_retryable());
        assert!(!AppError::Http { status: 404, message: String::new() }.is_retryable());
        assert!(!AppError::Decode("eof".into()).is_retryable());
        assert!(!AppError::Validation("bad".into()).is_retryable());
    }

    #[test]
    fn test_schema_error_conversion() {
        let schema = SchemaError::Missing { path: "$[0].id".to_string() };
        let err: AppError = schema.into();
        assert_eq!(err.to_string(), "Invalid payload: $[0].id: missing required field");
    }
}
