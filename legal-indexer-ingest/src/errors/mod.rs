//! Error types for the legal document ingestion.

use legal_indexer_repository::SearchIndexError;
use legal_indexer_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in the ingestion pipeline.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A local file or directory does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error from the blob store.
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    /// Error from the search index.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchIndexError),

    /// The search index did not acknowledge a write.
    #[error("Indexing error: {0}")]
    IndexingError(String),

    /// Local filesystem failure.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IngestError {
    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an indexing error.
    pub fn indexing(msg: impl Into<String>) -> Self {
        Self::IndexingError(msg.into())
    }
}
