//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (Azure Cognitive Search,
//! in-memory, test doubles).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::BatchOperationSummary;
use legal_indexer_shared::{DocumentHit, DocumentRecord, SearchQuery};

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into `SearchIndexClient`, which layers the
/// validation and error-reporting policy on top. Every method reports backend
/// failures as `Err`; deciding whether to swallow them is the client's job.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Name of the index this provider writes to.
    fn index_name(&self) -> &str;

    /// Create the index with the document schema if it does not exist yet.
    ///
    /// Calling this on an existing index succeeds and leaves its contents
    /// untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index exists or was created
    /// * `Err(SearchIndexError)` - If the backend rejected the creation for any
    ///   reason other than the index already existing
    async fn ensure_index(&self) -> Result<(), SearchIndexError>;

    /// Upload documents in one batch, replacing records with the same id.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-document acknowledgments
    /// * `Err(SearchIndexError)` - If the batch call failed as a whole
    async fn index_documents(
        &self,
        documents: &[DocumentRecord],
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Delete documents by id in one batch.
    ///
    /// Ids that are not present are acknowledged as successful deletes.
    async fn delete_documents(
        &self,
        ids: &[String],
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Run a free-text query, returning at most `query.limit` hits ordered by
    /// relevance.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DocumentHit>, SearchIndexError>;

    /// Fetch a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - If the document exists
    /// * `Ok(None)` - If no document has this id
    /// * `Err(SearchIndexError)` - If the lookup itself failed
    async fn get_document(&self, id: &str) -> Result<Option<DocumentRecord>, SearchIndexError>;

    /// Total number of documents in the index.
    async fn count(&self) -> Result<u64, SearchIndexError>;
}
