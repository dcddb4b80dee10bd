//! In-memory search index provider.
//!
//! Keeps documents in a process-local map and answers queries with simple
//! token matching. Used for offline development and tests; nothing is
//! persisted.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{BatchOperationResult, BatchOperationSummary};
use legal_indexer_shared::{DocumentHit, DocumentRecord, SearchQuery};

/// Search provider backed by a map from document id to record.
///
/// Matching is case-insensitive on alphanumeric tokens of the filename,
/// content, summary and keywords. A document matches when it contains any
/// query token; its score is the number of matching token occurrences.
pub struct InMemorySearchProvider {
    index_name: String,
    documents: RwLock<BTreeMap<String, DocumentRecord>>,
    created: AtomicBool,
}

impl InMemorySearchProvider {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            documents: RwLock::new(BTreeMap::new()),
            created: AtomicBool::new(false),
        }
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

fn score(record: &DocumentRecord, terms: &[String]) -> usize {
    let keywords = record.keywords.iter().map(String::as_str);
    [
        record.filename.as_str(),
        record.content.as_str(),
        record.summary.as_str(),
    ]
    .into_iter()
    .chain(keywords)
    .flat_map(tokenize)
    .filter(|token| terms.contains(token))
    .count()
}

/// A single `field eq value` clause of a filter expression.
#[derive(Debug, PartialEq)]
struct EqClause {
    field: String,
    value: String,
}

impl EqClause {
    fn matches(&self, record: &DocumentRecord) -> bool {
        match self.field.as_str() {
            "id" => record.id == self.value,
            "filename" => record.filename == self.value,
            "content" => record.content == self.value,
            "file_type" => record.file_type == self.value,
            "upload_date" => record.upload_date == self.value,
            "blob_url" => record.blob_url == self.value,
            "summary" => record.summary == self.value,
            "file_size" => record.file_size.to_string() == self.value,
            _ => false,
        }
    }
}

const FILTERABLE_FIELDS: [&str; 8] = [
    "id",
    "filename",
    "content",
    "file_type",
    "upload_date",
    "blob_url",
    "summary",
    "file_size",
];

/// Split on ` and ` outside single-quoted literals.
fn split_clauses(expr: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut in_quote = false;
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        if c == '\'' {
            in_quote = !in_quote;
        } else if !in_quote && i >= start && expr[i..].starts_with(" and ") {
            clauses.push(&expr[start..i]);
            start = i + " and ".len();
        }
    }
    clauses.push(&expr[start..]);
    clauses
}

/// Parse a filter made of `field eq 'value'` clauses joined by `and`.
///
/// Numeric fields take a bare number. Anything else is rejected.
fn parse_filter(expr: &str) -> Result<Vec<EqClause>, SearchIndexError> {
    split_clauses(expr)
        .into_iter()
        .map(|clause| {
            let clause = clause.trim();
            let mut parts = clause.splitn(3, ' ');
            let (field, op, raw) = match (parts.next(), parts.next(), parts.next()) {
                (Some(field), Some(op), Some(raw)) => (field, op, raw.trim()),
                _ => {
                    return Err(SearchIndexError::invalid_query(format!(
                        "Unsupported filter clause: {}",
                        clause
                    )))
                }
            };

            if op != "eq" || !FILTERABLE_FIELDS.contains(&field) {
                return Err(SearchIndexError::invalid_query(format!(
                    "Unsupported filter clause: {}",
                    clause
                )));
            }

            let value = if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
                raw[1..raw.len() - 1].replace("''", "'")
            } else if field == "file_size" && raw.parse::<u64>().is_ok() {
                raw.to_string()
            } else {
                return Err(SearchIndexError::invalid_query(format!(
                    "Unsupported filter value: {}",
                    raw
                )));
            };

            Ok(EqClause {
                field: field.to_string(),
                value,
            })
        })
        .collect()
}

#[async_trait]
impl SearchIndexProvider for InMemorySearchProvider {
    fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn ensure_index(&self) -> Result<(), SearchIndexError> {
        if self.created.swap(true, Ordering::SeqCst) {
            debug!(index = %self.index_name, "In-memory index already exists");
        } else {
            debug!(index = %self.index_name, "Created in-memory index");
        }
        Ok(())
    }

    async fn index_documents(
        &self,
        documents: &[DocumentRecord],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut store = self.documents.write().await;
        let results = documents
            .iter()
            .map(|doc| {
                store.insert(doc.id.clone(), doc.clone());
                BatchOperationResult {
                    id: doc.id.clone(),
                    success: true,
                    error: None,
                }
            })
            .collect();

        Ok(BatchOperationSummary::from_results(results))
    }

    async fn delete_documents(
        &self,
        ids: &[String],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut store = self.documents.write().await;
        let results = ids
            .iter()
            .map(|id| {
                store.remove(id);
                BatchOperationResult {
                    id: id.clone(),
                    success: true,
                    error: None,
                }
            })
            .collect();

        Ok(BatchOperationSummary::from_results(results))
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<DocumentHit>, SearchIndexError> {
        let clauses = match &query.filter {
            Some(expr) => parse_filter(expr)?,
            None => Vec::new(),
        };

        let text = query.text.trim();
        let match_all = text.is_empty() || text == "*";
        let terms: Vec<String> = tokenize(text).collect();

        let store = self.documents.read().await;
        let mut scored: Vec<(usize, &DocumentRecord)> = store
            .values()
            .filter(|record| clauses.iter().all(|clause| clause.matches(record)))
            .filter_map(|record| {
                if match_all {
                    return Some((1, record));
                }
                match score(record, &terms) {
                    0 => None,
                    n => Some((n, record)),
                }
            })
            .collect();

        // Highest score first; ties keep id order from the map.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(query.limit)
            .map(|(n, record)| DocumentHit::from_record(record, n as f64, query.select.as_deref()))
            .collect())
    }

    async fn get_document(&self, id: &str) -> Result<Option<DocumentRecord>, SearchIndexError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn count(&self) -> Result<u64, SearchIndexError> {
        Ok(self.documents.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, content: &str) -> DocumentRecord {
        DocumentRecord::new(filename, content, content.len() as u64, format!("mem://{}", filename))
    }

    async fn seeded() -> InMemorySearchProvider {
        let provider = InMemorySearchProvider::new("test-index");
        provider
            .index_documents(&[
                record("lease.txt", "The tenant may request contract termination early."),
                record("nda.md", "Confidential information shall not be disclosed."),
                record("brief.pdf", "Termination of the contract. Contract law applies."),
            ])
            .await
            .unwrap();
        provider
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<String> = tokenize("Contract-Termination, (2024)").collect();
        assert_eq!(tokens, vec!["contract", "termination", "2024"]);
    }

    #[test]
    fn test_parse_filter() {
        let clauses = parse_filter("file_type eq '.pdf' and filename eq 'O''Brien.pdf'").unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].value, ".pdf");
        assert_eq!(clauses[1].value, "O'Brien.pdf");

        assert!(parse_filter("file_size eq 10").is_ok());
        assert!(parse_filter("file_size gt 10").is_err());
        assert!(parse_filter("owner eq 'x'").is_err());
        assert!(parse_filter("filename eq unquoted").is_err());
    }

    #[test]
    fn test_parse_filter_keeps_and_inside_literal() {
        let clauses =
            parse_filter("filename eq 'Smith and Jones Lease.txt' and file_type eq '.txt'").unwrap();

        assert_eq!(
            clauses,
            vec![
                EqClause {
                    field: "filename".to_string(),
                    value: "Smith and Jones Lease.txt".to_string(),
                },
                EqClause {
                    field: "file_type".to_string(),
                    value: ".txt".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_filter_on_filename_containing_and() {
        let provider = seeded().await;
        provider
            .index_documents(&[record("Smith and Jones Lease.txt", "Lease between the parties.")])
            .await
            .unwrap();

        let hits = provider
            .search(
                &SearchQuery::new("lease").with_filter("filename eq 'Smith and Jones Lease.txt'"),
            )
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].filename.as_deref(), Some("Smith and Jones Lease.txt"));
    }

    #[tokio::test]
    async fn test_search_ranks_by_term_frequency() {
        let provider = seeded().await;

        let hits = provider
            .search(&SearchQuery::new("contract termination").with_limit(5))
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].filename.as_deref(), Some("brief.pdf"));
        assert_eq!(hits[1].filename.as_deref(), Some("lease.txt"));
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn test_search_respects_limit_and_wildcard() {
        let provider = seeded().await;

        let hits = provider
            .search(&SearchQuery::new("*").with_limit(2))
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_search_with_filter_and_select() {
        let provider = seeded().await;
        let query = SearchQuery::new("contract")
            .with_filter("file_type eq '.txt'")
            .with_select(["filename"]);

        let hits = provider.search(&query).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].filename.as_deref(), Some("lease.txt"));
        assert!(hits[0].content.is_none());
    }

    #[tokio::test]
    async fn test_search_invalid_filter_is_error() {
        let provider = seeded().await;
        let result = provider
            .search(&SearchQuery::new("contract").with_filter("file_size gt 3"))
            .await;
        assert!(matches!(result, Err(SearchIndexError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_upload_replaces_existing_record() {
        let provider = seeded().await;

        provider
            .index_documents(&[record("nda.md", "Revised terms.")])
            .await
            .unwrap();

        assert_eq!(provider.count().await.unwrap(), 3);
        let stored = provider
            .get_document(&legal_indexer_shared::document_id("nda.md"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.content, "Revised terms.");
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_acknowledged() {
        let provider = seeded().await;

        let summary = provider
            .delete_documents(&["does-not-exist".to_string()])
            .await
            .unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(provider.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_ensure_index_is_idempotent() {
        let provider = seeded().await;
        provider.ensure_index().await.unwrap();
        provider.ensure_index().await.unwrap();
        assert_eq!(provider.count().await.unwrap(), 3);
    }
}
