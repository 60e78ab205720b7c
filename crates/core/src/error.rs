//! Error types for s3cp-core
//!
//! Provides a unified error type shared by the copy orchestrator, the
//! storage adapter and the CLI bootstrap.

use thiserror::Error;

/// Result type alias for s3cp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3cp-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command-line usage detected before any transfer
    #[error("{0}")]
    Usage(String),

    /// Invalid local path or remote URI
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration or credentials file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or service error
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Wrap an IO error with the path it happened on
    pub fn io_at(path: &std::path::Path, err: std::io::Error) -> Self {
        Error::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {err}", path.display()),
        ))
    }
}
