//! Object store error types.

use thiserror::Error;

/// Errors that can occur during object store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Missing or malformed connection settings.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A local file or remote blob does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request never got an HTTP response.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service answered with an unexpected status.
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Local filesystem failure.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::BackendError(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
