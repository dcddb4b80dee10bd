//! Search index client implementation.
//!
//! This module provides the main client for interacting with the search index.
//! Application code uses this to upsert, query, fetch and delete documents.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::SearchIndexConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{IndexStatistics, UpsertDocumentRequest};
use legal_indexer_shared::{DocumentHit, DocumentRecord, SearchQuery};

/// The main client for interacting with the search index.
///
/// `search`, `get` and `count` log backend failures and return an empty
/// result instead. An empty result is therefore either "nothing matched" or
/// "the backend is down"; use the `try_*` variants to tell them apart.
#[derive(Clone)]
pub struct SearchIndexClient {
    provider: Arc<dyn SearchIndexProvider>,
    config: SearchIndexConfig,
}

impl SearchIndexClient {
    /// Create a new SearchIndexClient with default configuration.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: SearchIndexConfig::default(),
        }
    }

    /// Create a new SearchIndexClient with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: SearchIndexConfig) -> Self {
        Self { provider, config }
    }

    pub fn index_name(&self) -> &str {
        self.provider.index_name()
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchIndexError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchIndexError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Create the index if it does not exist. Safe to call repeatedly.
    pub async fn ensure_index(&self) -> Result<(), SearchIndexError> {
        self.provider.ensure_index().await
    }

    /// Insert or replace a single document.
    ///
    /// Returns `false` if the request is missing `id`, `filename` or
    /// `content`, if the backend call fails, or if the backend rejects the
    /// document. Failures are logged.
    pub async fn upsert_one(&self, request: UpsertDocumentRequest) -> bool {
        let label = request.label().to_string();
        let record = match DocumentRecord::try_from(request) {
            Ok(record) => record,
            Err(e) => {
                error!(document = %label, error = %e, "Rejected document");
                return false;
            }
        };

        match self.provider.index_documents(std::slice::from_ref(&record)).await {
            Ok(summary) if summary.succeeded == 1 => {
                debug!(id = %record.id, filename = %record.filename, "Indexed document");
                true
            }
            Ok(summary) => {
                let reason = summary
                    .results
                    .into_iter()
                    .find_map(|r| r.error)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "not acknowledged".to_string());
                error!(id = %record.id, reason = %reason, "Backend rejected document");
                false
            }
            Err(e) => {
                error!(id = %record.id, error = %e, "Failed to index document");
                false
            }
        }
    }

    /// Insert or replace several documents in one batch.
    ///
    /// Invalid requests are logged and left out of the batch. Returns the
    /// number of documents the backend acknowledged; a failed batch call, or a
    /// batch above `max_batch_size`, yields 0. Compare the result with the
    /// input length to detect partial failure.
    pub async fn upsert_many(&self, requests: Vec<UpsertDocumentRequest>) -> usize {
        let total = requests.len();
        let records: Vec<DocumentRecord> = requests
            .into_iter()
            .filter_map(|request| {
                let label = request.label().to_string();
                DocumentRecord::try_from(request)
                    .map_err(|e| error!(document = %label, error = %e, "Rejected document"))
                    .ok()
            })
            .collect();

        if records.is_empty() {
            return 0;
        }

        if let Err(e) = self.validate_batch_size(records.len()) {
            error!(error = %e, "Batch not submitted");
            return 0;
        }

        match self.provider.index_documents(&records).await {
            Ok(summary) => {
                if summary.succeeded < total {
                    warn!(
                        total,
                        succeeded = summary.succeeded,
                        "Batch upsert partially failed"
                    );
                }
                summary.succeeded
            }
            Err(e) => {
                error!(total, error = %e, "Batch upsert failed");
                0
            }
        }
    }

    /// Run a query, surfacing backend failures.
    pub async fn try_search(&self, query: &SearchQuery) -> Result<Vec<DocumentHit>, SearchIndexError> {
        self.provider.search(query).await
    }

    /// Run a query. Returns an empty list on any backend failure.
    pub async fn search(&self, query: &SearchQuery) -> Vec<DocumentHit> {
        self.try_search(query).await.unwrap_or_else(|e| {
            error!(query = %query.text, error = %e, "Search failed");
            Vec::new()
        })
    }

    /// Fetch a document by id, surfacing backend failures.
    pub async fn try_get(&self, id: &str) -> Result<Option<DocumentRecord>, SearchIndexError> {
        self.provider.get_document(id).await
    }

    /// Fetch a document by id. Returns `None` when it does not exist and
    /// also when the lookup fails.
    pub async fn get(&self, id: &str) -> Option<DocumentRecord> {
        self.try_get(id).await.unwrap_or_else(|e| {
            error!(id = %id, error = %e, "Document lookup failed");
            None
        })
    }

    /// Delete a document by id. Deleting an absent id succeeds.
    pub async fn delete(&self, id: &str) -> bool {
        match self.provider.delete_documents(&[id.to_string()]).await {
            Ok(summary) => summary.succeeded == 1,
            Err(e) => {
                error!(id = %id, error = %e, "Failed to delete document");
                false
            }
        }
    }

    /// Total number of indexed documents, surfacing backend failures.
    pub async fn try_count(&self) -> Result<u64, SearchIndexError> {
        self.provider.count().await
    }

    /// Total number of indexed documents. Returns 0 on backend failure.
    pub async fn count(&self) -> u64 {
        self.try_count().await.unwrap_or_else(|e| {
            error!(error = %e, "Document count failed");
            0
        })
    }

    pub async fn statistics(&self) -> IndexStatistics {
        IndexStatistics {
            document_count: self.count().await,
            index_name: self.index_name().to_string(),
        }
    }
}
