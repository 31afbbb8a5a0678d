//! Error types for ds-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for ds-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for docstore operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid path format
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored text is not valid UTF-8
    #[error("Invalid UTF-8 in object: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or storage service error
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Network(_) => 2,  // NetworkError
            Error::Auth(_) => 3,     // AuthError
            Error::NotFound(_) => 4, // NotFound
            _ => 1,                  // Failure
        }
    }
}
