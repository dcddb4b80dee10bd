//! Search query and result types.

use serde::{Deserialize, Serialize};

use crate::DocumentRecord;

/// Number of hits returned when the caller does not set a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A free-text query against the document index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Query text passed to the backend analyzer. `*` matches every document.
    pub text: String,
    /// Maximum number of hits to return.
    pub limit: usize,
    /// Fields to return; `None` returns every retrievable field.
    pub select: Option<Vec<String>>,
    /// Backend filter expression (OData syntax).
    pub filter: Option<String>,
}

impl SearchQuery {
    /// Create a query with the default limit, no field selection and no filter.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            select: None,
            filter: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// A single search hit.
///
/// Every document field is optional because a query may select a subset of
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentHit {
    /// Relevance score assigned by the backend.
    #[serde(rename = "@search.score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl DocumentHit {
    /// Build a hit from a full record, keeping only the selected fields.
    pub fn from_record(record: &DocumentRecord, score: f64, select: Option<&[String]>) -> Self {
        let wants = |field: &str| select.map_or(true, |fields| fields.iter().any(|f| f == field));

        Self {
            score: Some(score),
            id: wants("id").then(|| record.id.clone()),
            filename: wants("filename").then(|| record.filename.clone()),
            content: wants("content").then(|| record.content.clone()),
            file_type: wants("file_type").then(|| record.file_type.clone()),
            upload_date: wants("upload_date").then(|| record.upload_date.clone()),
            file_size: wants("file_size").then_some(record.file_size),
            blob_url: wants("blob_url").then(|| record.blob_url.clone()),
            summary: wants("summary").then(|| record.summary.clone()),
            keywords: wants("keywords").then(|| record.keywords.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = SearchQuery::new("indemnification")
            .with_limit(3)
            .with_select(["filename", "summary"])
            .with_filter("file_type eq '.pdf'");

        assert_eq!(query.text, "indemnification");
        assert_eq!(query.limit, 3);
        assert_eq!(
            query.select,
            Some(vec!["filename".to_string(), "summary".to_string()])
        );
        assert_eq!(query.filter.as_deref(), Some("file_type eq '.pdf'"));
    }

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::new("lease");
        assert_eq!(query.limit, DEFAULT_SEARCH_LIMIT);
        assert!(query.select.is_none());
        assert!(query.filter.is_none());
    }

    #[test]
    fn test_hit_from_record_with_selection() {
        let record = DocumentRecord::new("nda.txt", "mutual nda", 10, "https://x/nda.txt");
        let select = vec!["filename".to_string(), "file_size".to_string()];

        let hit = DocumentHit::from_record(&record, 2.0, Some(&select));

        assert_eq!(hit.score, Some(2.0));
        assert_eq!(hit.filename.as_deref(), Some("nda.txt"));
        assert_eq!(hit.file_size, Some(10));
        assert!(hit.id.is_none());
        assert!(hit.content.is_none());
    }

    #[test]
    fn test_hit_deserializes_backend_shape() {
        let json = serde_json::json!({
            "@search.score": 1.25,
            "id": "abc",
            "filename": "brief.pdf",
            "keywords": ["appeal"]
        });

        let hit: DocumentHit = serde_json::from_value(json).unwrap();

        assert_eq!(hit.score, Some(1.25));
        assert_eq!(hit.filename.as_deref(), Some("brief.pdf"));
        assert_eq!(hit.keywords, Some(vec!["appeal".to_string()]));
        assert!(hit.content.is_none());
    }
}
