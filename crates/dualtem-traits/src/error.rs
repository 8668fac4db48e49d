//! Error types for trait operations.

use thiserror::Error;

/// Result alias for source operations.
pub type TraitResult<T> = Result<T, TraitError>;

/// Common error type for trait operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Service answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    HttpStatus {
        /// Status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<serde_json::Error> for TraitError {
    fn from(e: serde_json::Error) -> Self {
        TraitError::ParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TraitError::HttpStatus {
            status: 503,
            url: "https://example.test/feed".into(),
        };
        assert_eq!(err.to_string(), "HTTP status 503 from https://example.test/feed");
        assert_eq!(TraitError::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_from_serde_json() {
        let err: TraitError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, TraitError::ParseError(_)));
    }
}
