//! Orchestrator module for the ingestion pipeline.
//!
//! Runs each file through extraction, upload and indexing, and exposes the
//! read and maintenance operations that span both backends.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::errors::IngestError;
use crate::processor::{DocumentMetadata, DocumentProcessor};
use crate::types::{
    BlobStorageStatistics, FileOutcome, IngestionStage, IngestionSummary, PipelineStatistics,
};
use legal_indexer_repository::SearchIndexClient;
use legal_indexer_shared::{is_supported_extension, DocumentHit, DocumentRecord, SearchQuery};
use legal_indexer_storage::DocumentStorage;

/// Orchestrator that coordinates blob storage and the search index.
///
/// Files are processed one at a time. There are no retries: the first failing
/// stage marks the file failed and the orchestrator moves on.
pub struct Orchestrator {
    storage: DocumentStorage,
    search: SearchIndexClient,
    processor: DocumentProcessor,
}

fn failed(stage: IngestionStage, reason: impl Into<String>) -> FileOutcome {
    FileOutcome::Failed {
        stage,
        reason: reason.into(),
    }
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(storage: DocumentStorage, search: SearchIndexClient) -> Self {
        Self {
            storage,
            search,
            processor: DocumentProcessor::new(),
        }
    }

    /// Make sure the container and the index exist.
    pub async fn initialize(&self) -> Result<(), IngestError> {
        self.storage.ensure_container().await?;
        self.search.ensure_index().await?;
        info!(
            container = %self.storage.container_name(),
            index = %self.search.index_name(),
            storage_backend = %self.storage.backend_name(),
            "Orchestrator initialized"
        );
        Ok(())
    }

    /// Extract, upload and index one file.
    ///
    /// Extraction problems are not fatal; the record gets placeholder content.
    /// Upload and index failures are reported in the returned outcome.
    #[instrument(skip(self, path, metadata), fields(path = %path.display()))]
    pub async fn ingest_file(&self, path: &Path, metadata: DocumentMetadata) -> FileOutcome {
        let filename = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return failed(IngestionStage::Pending, "Path has no file name"),
        };

        debug!(stage = %IngestionStage::Extracting, "Stage transition");
        let content = self.processor.extract(path).await;

        debug!(stage = %IngestionStage::Uploading, "Stage transition");
        let file_size = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(e) => {
                error!(error = %e, "Failed to read file");
                return failed(IngestionStage::Uploading, e.to_string());
            }
        };
        let blob_name = match self.storage.upload(path, None).await {
            Ok(name) => name,
            Err(e) => {
                error!(error = %e, "Failed to upload file");
                return failed(IngestionStage::Uploading, e.to_string());
            }
        };
        let blob_url = self.storage.url_for(&blob_name);

        debug!(stage = %IngestionStage::Indexing, "Stage transition");
        let record = self
            .processor
            .build_record(&filename, content, file_size, blob_url, metadata);
        let document_id = record.id.clone();

        if !self.search.upsert_one(record.into()).await {
            error!(filename = %filename, "Failed to index document");
            return failed(
                IngestionStage::Indexing,
                "Search index did not accept the document",
            );
        }

        info!(filename = %filename, document_id = %document_id, "Uploaded and indexed document");
        FileOutcome::Succeeded {
            document_id,
            blob_name,
        }
    }

    /// Ingest every file directly inside `dir`.
    ///
    /// Subdirectories are ignored. Files with unsupported extensions are
    /// counted as skipped. Only a missing or unreadable directory is an error.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub async fn ingest_directory(&self, dir: &Path) -> Result<IngestionSummary, IngestError> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::not_found(format!("Directory not found: {}", dir.display()))
            } else {
                IngestError::IoError(e)
            }
        })?;

        let mut summary = IngestionSummary::default();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            // Follows symlinks, so a linked document is ingested like a file.
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cannot stat entry");
                    continue;
                }
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_supported_extension(&name) {
                warn!(filename = %name, "Skipping unsupported file type");
                summary.skipped += 1;
                continue;
            }

            let outcome = self.ingest_file(&path, DocumentMetadata::default()).await;
            summary.record(&outcome);
        }

        info!(%summary, "Directory processing complete");
        Ok(summary)
    }

    /// Free-text search. Backend failures yield an empty list.
    pub async fn search(&self, query: &SearchQuery) -> Vec<DocumentHit> {
        self.search.search(query).await
    }

    pub async fn get_document(&self, document_id: &str) -> Option<DocumentRecord> {
        self.search.get(document_id).await
    }

    /// Blob names currently in storage.
    pub async fn list_documents(&self) -> Result<Vec<String>, IngestError> {
        Ok(self.storage.list().await?)
    }

    /// Remove a document from the index and its blob from storage.
    ///
    /// The blob name is taken from the indexed record. A blob that is already
    /// gone only logs a warning. Returns `false` when no document had this
    /// id.
    #[instrument(skip(self))]
    pub async fn delete_document(&self, document_id: &str) -> Result<bool, IngestError> {
        let Some(record) = self.search.try_get(document_id).await? else {
            return Ok(false);
        };

        if !self.search.delete(document_id).await {
            return Err(IngestError::indexing(format!(
                "Search index did not delete {}",
                document_id
            )));
        }

        match self.storage.delete(&record.filename).await {
            Ok(()) => debug!(blob_name = %record.filename, "Deleted blob"),
            Err(e) if e.is_not_found() => {
                warn!(blob_name = %record.filename, "Blob already absent")
            }
            Err(e) => return Err(e.into()),
        }
        Ok(true)
    }

    /// Download a stored blob to `dest`.
    pub async fn download(&self, blob_name: &str, dest: &Path) -> Result<PathBuf, IngestError> {
        Ok(self.storage.download(blob_name, dest).await?)
    }

    /// Document counts in storage and in the index.
    pub async fn statistics(&self) -> Result<PipelineStatistics, IngestError> {
        let blobs = self.storage.list().await?;
        Ok(PipelineStatistics {
            blob_storage: BlobStorageStatistics {
                document_count: blobs.len(),
                container_name: self.storage.container_name().to_string(),
            },
            search_index: self.search.statistics().await,
        })
    }
}
