//! Document record type and filename-derived metadata.

use chrono::Utc;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

/// File extensions accepted for upload and ingestion (lowercase, with the dot).
pub const SUPPORTED_EXTENSIONS: [&str; 5] = [".pdf", ".txt", ".doc", ".docx", ".md"];

/// A legal document as stored in the search index.
///
/// Records are built once per ingestion and replace any previous record with
/// the same `id` when indexed. The `id` depends only on the filename, so two
/// different files sharing a name map to the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// MD5 hex digest of the filename.
    pub id: String,
    /// Base name of the uploaded file.
    pub filename: String,
    /// Extracted text, or a placeholder when extraction is unsupported.
    pub content: String,
    /// Lowercase extension including the dot (empty when there is none).
    pub file_type: String,
    /// Upload time, UTC ISO-8601 with a `Z` suffix.
    pub upload_date: String,
    /// File size in bytes.
    pub file_size: u64,
    /// URL of the blob holding the original file.
    pub blob_url: String,
    /// Caller-supplied summary or [`default_summary`].
    pub summary: String,
    /// Caller-supplied keywords, in order.
    pub keywords: Vec<String>,
}

impl DocumentRecord {
    /// Create a record for `filename` stamped with the current time.
    ///
    /// `id`, `file_type` and `summary` are derived from the filename; keywords
    /// start empty.
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        file_size: u64,
        blob_url: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        Self {
            id: document_id(&filename),
            file_type: file_extension(&filename),
            summary: default_summary(&filename),
            filename,
            content: content.into(),
            upload_date: utc_timestamp(),
            file_size,
            blob_url: blob_url.into(),
            keywords: Vec::new(),
        }
    }

    /// Replace the default summary when one is supplied.
    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        if let Some(summary) = summary {
            self.summary = summary;
        }
        self
    }

    /// Set the keyword list.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }
}

/// Deterministic document id: the lowercase MD5 hex digest of `filename`.
pub fn document_id(filename: &str) -> String {
    hex::encode(Md5::digest(filename.as_bytes()))
}

/// Lowercase extension of `filename`, including the leading dot.
///
/// Leading dots do not start an extension, so `.env` has none.
pub fn file_extension(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem_start = base.len() - base.trim_start_matches('.').len();
    match base[stem_start..].rfind('.') {
        Some(pos) => base[stem_start + pos..].to_lowercase(),
        None => String::new(),
    }
}

/// Whether `filename` carries one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_extension(filename: &str) -> bool {
    let ext = file_extension(filename);
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

/// Summary used when the caller does not provide one.
pub fn default_summary(filename: &str) -> String {
    format!("Legal document: {}", filename)
}

/// Current UTC time as ISO-8601 with microseconds and a `Z` suffix.
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_md5_of_filename() {
        assert_eq!(document_id(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(document_id("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_document_id_ignores_content() {
        let first = DocumentRecord::new("nda.txt", "version one", 11, "u1");
        let second = DocumentRecord::new("nda.txt", "version two", 11, "u2");
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("brief.PDF"), ".pdf");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".env"), "");
        assert_eq!(file_extension("..hidden.md"), ".md");
        assert_eq!(file_extension("dir/notes.Md"), ".md");
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("contract.docx"));
        assert!(is_supported_extension("memo.TXT"));
        assert!(!is_supported_extension("photo.png"));
        assert!(!is_supported_extension("Makefile"));
    }

    #[test]
    fn test_new_record_defaults() {
        let record = DocumentRecord::new("lease.md", "# Lease", 7, "https://x/lease.md");

        assert_eq!(record.file_type, ".md");
        assert_eq!(record.summary, "Legal document: lease.md");
        assert!(record.keywords.is_empty());
        assert!(record.upload_date.ends_with('Z'));
        assert_eq!(record.file_size, 7);
    }

    #[test]
    fn test_builder_overrides() {
        let record = DocumentRecord::new("lease.md", "text", 4, "u")
            .with_summary(Some("Commercial lease".to_string()))
            .with_keywords(vec!["lease".to_string(), "rent".to_string()]);
        assert_eq!(record.summary, "Commercial lease");
        assert_eq!(record.keywords, vec!["lease", "rent"]);

        let record = DocumentRecord::new("lease.md", "text", 4, "u").with_summary(None);
        assert_eq!(record.summary, "Legal document: lease.md");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = utc_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
