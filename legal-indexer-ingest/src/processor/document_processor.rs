//! Document processor implementation.
//!
//! Turns a local file plus caller metadata into a `DocumentRecord`.

use std::path::Path;

use tracing::debug;

use crate::processor::extraction::extract_text;
use legal_indexer_shared::DocumentRecord;

/// Caller-supplied metadata attached to an ingested file.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    /// Replaces the default `"Legal document: {filename}"` summary.
    pub summary: Option<String>,
    pub keywords: Vec<String>,
}

/// Processor that assembles search records for ingested files.
///
/// The processor is responsible for:
/// - Extracting the text that goes into `content`
/// - Filling in id, file type, timestamp and default summary
pub struct DocumentProcessor {}

impl DocumentProcessor {
    /// Create a new document processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Extract the text of a local file. Never fails.
    pub async fn extract(&self, path: &Path) -> String {
        extract_text(path).await
    }

    /// Build the record for an uploaded file.
    ///
    /// # Arguments
    ///
    /// * `filename` - Base name of the file; determines the id
    /// * `content` - Extracted text
    /// * `file_size` - Size in bytes
    /// * `blob_url` - Where the stored copy can be fetched
    /// * `metadata` - Optional summary and keywords
    pub fn build_record(
        &self,
        filename: &str,
        content: String,
        file_size: u64,
        blob_url: String,
        metadata: DocumentMetadata,
    ) -> DocumentRecord {
        let record = DocumentRecord::new(filename, content, file_size, blob_url)
            .with_summary(metadata.summary.filter(|s| !s.is_empty()))
            .with_keywords(metadata.keywords);

        debug!(id = %record.id, filename = %filename, "Built document record");
        record
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_indexer_shared::document_id;

    #[test]
    fn test_build_record_defaults() {
        let processor = DocumentProcessor::new();

        let record = processor.build_record(
            "brief.pdf",
            "text".to_string(),
            42,
            "https://files.test/brief.pdf".to_string(),
            DocumentMetadata::default(),
        );

        assert_eq!(record.id, document_id("brief.pdf"));
        assert_eq!(record.file_type, ".pdf");
        assert_eq!(record.file_size, 42);
        assert_eq!(record.summary, "Legal document: brief.pdf");
        assert!(record.keywords.is_empty());
    }

    #[test]
    fn test_build_record_with_metadata() {
        let processor = DocumentProcessor::new();

        let record = processor.build_record(
            "lease.txt",
            "text".to_string(),
            4,
            String::new(),
            DocumentMetadata {
                summary: Some("Commercial lease".to_string()),
                keywords: vec!["lease".to_string(), "tenant".to_string()],
            },
        );

        assert_eq!(record.summary, "Commercial lease");
        assert_eq!(record.keywords, vec!["lease", "tenant"]);
    }
}
