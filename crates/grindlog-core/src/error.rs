//! Error types for grindlog.

use thiserror::Error;

/// Result type alias using grindlog's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for grindlog operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Key-value store operation failed (wraps redis::RedisError)
    #[error("Storage error: {0}")]
    Storage(#[from] redis::RedisError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Problem not found
    #[error("Problem not found: {0}")]
    ProblemNotFound(uuid::Uuid),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL does not belong to a supported judge
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Judge site unreachable or returned a malformed response
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
