//! Request and response types for search index operations.

use serde::Serialize;

use crate::errors::SearchIndexError;
use legal_indexer_shared::{default_summary, file_extension, utc_timestamp, DocumentRecord};

/// Request to insert or replace a document in the search index.
///
/// `id`, `filename` and `content` are required; an absent or empty `id` or
/// `filename` and an absent `content` fail validation. The other fields fall
/// back to values derived from the filename.
#[derive(Debug, Clone, Default)]
pub struct UpsertDocumentRequest {
    pub id: Option<String>,
    pub filename: Option<String>,
    pub content: Option<String>,
    pub file_type: Option<String>,
    pub upload_date: Option<String>,
    pub file_size: Option<u64>,
    pub blob_url: Option<String>,
    pub summary: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl UpsertDocumentRequest {
    /// Label used in logs: the filename when present, otherwise the id.
    pub fn label(&self) -> &str {
        self.filename
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("unknown")
    }
}

impl From<DocumentRecord> for UpsertDocumentRequest {
    fn from(record: DocumentRecord) -> Self {
        Self {
            id: Some(record.id),
            filename: Some(record.filename),
            content: Some(record.content),
            file_type: Some(record.file_type),
            upload_date: Some(record.upload_date),
            file_size: Some(record.file_size),
            blob_url: Some(record.blob_url),
            summary: Some(record.summary),
            keywords: Some(record.keywords),
        }
    }
}

impl TryFrom<UpsertDocumentRequest> for DocumentRecord {
    type Error = SearchIndexError;

    fn try_from(req: UpsertDocumentRequest) -> Result<Self, Self::Error> {
        let id = req
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SearchIndexError::validation("Required field 'id' is missing"))?;
        let filename = req
            .filename
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SearchIndexError::validation("Required field 'filename' is missing"))?;
        let content = req
            .content
            .ok_or_else(|| SearchIndexError::validation("Required field 'content' is missing"))?;

        Ok(DocumentRecord {
            file_type: req.file_type.unwrap_or_else(|| file_extension(&filename)),
            summary: req.summary.unwrap_or_else(|| default_summary(&filename)),
            upload_date: req.upload_date.unwrap_or_else(utc_timestamp),
            file_size: req.file_size.unwrap_or(0),
            blob_url: req.blob_url.unwrap_or_default(),
            keywords: req.keywords.unwrap_or_default(),
            id,
            filename,
            content,
        })
    }
}

/// Result of a batch operation for a single item.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The document id.
    pub id: String,
    /// Whether the backend acknowledged the operation.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchIndexError>,
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Callers compare `succeeded` with `total` to detect partial failure.
#[derive(Debug, Clone)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Summary for a batch with no items.
    pub fn empty() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            results: vec![],
        }
    }

    /// Build a summary by tallying individual results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }
}

/// Document count and name of a search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStatistics {
    pub document_count: u64,
    pub index_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> UpsertDocumentRequest {
        UpsertDocumentRequest {
            id: Some("abc".to_string()),
            filename: Some("lease.txt".to_string()),
            content: Some("Tenant shall pay rent.".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_try_from_fills_defaults() {
        let record = DocumentRecord::try_from(full_request()).unwrap();

        assert_eq!(record.id, "abc");
        assert_eq!(record.file_type, ".txt");
        assert_eq!(record.summary, "Legal document: lease.txt");
        assert_eq!(record.file_size, 0);
        assert!(record.keywords.is_empty());
        assert!(record.upload_date.ends_with('Z'));
    }

    #[test]
    fn test_try_from_missing_content() {
        let request = UpsertDocumentRequest {
            content: None,
            ..full_request()
        };

        let result = DocumentRecord::try_from(request);
        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));
    }

    #[test]
    fn test_try_from_empty_id() {
        let request = UpsertDocumentRequest {
            id: Some(String::new()),
            ..full_request()
        };
        assert!(DocumentRecord::try_from(request).is_err());
    }

    #[test]
    fn test_empty_content_is_valid() {
        let request = UpsertDocumentRequest {
            content: Some(String::new()),
            ..full_request()
        };
        assert!(DocumentRecord::try_from(request).is_ok());
    }

    #[test]
    fn test_record_round_trips_through_request() {
        let record = DocumentRecord::new("nda.md", "text", 4, "https://x/nda.md");
        let back = DocumentRecord::try_from(UpsertDocumentRequest::from(record.clone())).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_summary_from_results() {
        let summary = BatchOperationSummary::from_results(vec![
            BatchOperationResult {
                id: "a".to_string(),
                success: true,
                error: None,
            },
            BatchOperationResult {
                id: "b".to_string(),
                success: false,
                error: Some(SearchIndexError::index("rejected")),
            },
        ]);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
    }
}
