//! Error types for store and generator collaborators

use thiserror::Error;

/// Error type for document store operations
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Backend connection failed
    #[error("connection error: {0}")]
    Connection(String),

    /// Backend operation failed
    #[error("backend error: {0}")]
    Backend(String),

    /// Document could not be encoded for storage
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Stored document could not be decoded
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error type for recipe generator calls
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    /// Transport-level failure
    #[error("generator request failed: {0}")]
    RequestFailed(String),

    /// The generator answered with a non-success status
    #[error("generator returned error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Generator output could not be parsed
    #[error("failed to parse generator output: {0}")]
    Parse(String),

    /// Generator answered without any text
    #[error("generator returned no content")]
    EmptyResponse,

    /// Generator is missing required configuration
    #[error("generator not configured: {0}")]
    NotConfigured(String),

    /// Timeout
    #[error("generator timed out")]
    Timeout,
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Backend("down".to_string());
        assert_eq!(err.to_string(), "backend error: down");

        let err = StoreError::Deserialization("bad json".to_string());
        assert_eq!(err.to_string(), "deserialization error: bad json");
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "generator returned error: 503 - overloaded");

        let err = GenerationError::Parse("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "failed to parse generator output: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = GenerationError::Timeout;
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
