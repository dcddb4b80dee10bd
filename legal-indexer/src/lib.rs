//! # Legal Indexer
//!
//! Main library for the legal document indexer.
//!
//! This crate provides the settings and dependency wiring used by the
//! `legal-indexer` binary.

pub mod config;

pub use config::{Dependencies, Settings};

use legal_indexer_ingest::{FileOutcome, IngestionStage};
use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A single file did not make it into the index.
    #[error("Ingestion failed while {stage}: {reason}")]
    FileFailed {
        stage: IngestionStage,
        reason: String,
    },

    /// Ingestion error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] legal_indexer_ingest::IngestError),

    /// Search index error.
    #[error("Search error: {0}")]
    SearchError(#[from] legal_indexer_repository::SearchIndexError),

    /// Blob storage error.
    #[error("Storage error: {0}")]
    StorageError(#[from] legal_indexer_storage::StorageError),

    /// Failed to render output.
    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Turn a `Failed` single-file outcome into an error so the process exits
/// non-zero.
pub fn ensure_ingested(outcome: &FileOutcome) -> Result<(), IndexerError> {
    match outcome {
        FileOutcome::Succeeded { .. } => Ok(()),
        FileOutcome::Failed { stage, reason } => Err(IndexerError::FileFailed {
            stage: *stage,
            reason: reason.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_ingested() {
        let ok = FileOutcome::Succeeded {
            document_id: "abc".to_string(),
            blob_name: "lease.txt".to_string(),
        };
        assert!(ensure_ingested(&ok).is_ok());

        let failed = FileOutcome::Failed {
            stage: IngestionStage::Uploading,
            reason: "Not found: lease.txt".to_string(),
        };
        let err = ensure_ingested(&failed).unwrap_err();
        assert!(matches!(
            err,
            IndexerError::FileFailed {
                stage: IngestionStage::Uploading,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Ingestion failed while uploading: Not found: lease.txt"
        );
    }
}
