//! Azure Cognitive Search request builders and response parsing.
//!
//! This module builds the JSON bodies for the search and document batch
//! endpoints and maps their responses onto the repository types.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationResult, BatchOperationSummary};
use legal_indexer_shared::{DocumentHit, DocumentRecord, SearchQuery};

/// Build the body of a `docs/search` request.
///
/// Total count is always requested; `select` and `filter` are only sent when
/// the query sets them.
pub fn build_search_body(query: &SearchQuery) -> Value {
    let mut body = json!({
        "search": query.text,
        "top": query.limit,
        "count": true
    });

    if let Some(fields) = &query.select {
        body["select"] = json!(fields.join(","));
    }
    if let Some(filter) = &query.filter {
        body["filter"] = json!(filter);
    }

    body
}

/// Build a `docs/index` batch that uploads (insert or replace) every record.
pub fn build_upload_batch(documents: &[DocumentRecord]) -> Result<Value, SearchIndexError> {
    let actions = documents
        .iter()
        .map(|doc| {
            let mut action = match serde_json::to_value(doc) {
                Ok(Value::Object(fields)) => fields,
                Ok(other) => {
                    return Err(SearchIndexError::index(format!(
                        "Document {} did not serialize to an object: {}",
                        doc.id, other
                    )))
                }
                Err(e) => return Err(SearchIndexError::index(e.to_string())),
            };
            action.insert("@search.action".to_string(), json!("upload"));
            Ok(Value::Object(action))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({ "value": actions }))
}

/// Build a `docs/index` batch that deletes the given keys.
pub fn build_delete_batch(ids: &[String]) -> Value {
    let actions: Vec<Value> = ids
        .iter()
        .map(|id| {
            let mut action = Map::new();
            action.insert("@search.action".to_string(), json!("delete"));
            action.insert("id".to_string(), json!(id));
            Value::Object(action)
        })
        .collect();

    json!({ "value": actions })
}

/// Per-document acknowledgment from the `docs/index` endpoint.
#[derive(Debug, Deserialize)]
pub struct IndexingResult {
    pub key: String,
    pub status: bool,
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct IndexBatchResponse {
    value: Vec<IndexingResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<DocumentHit>,
}

/// Parse a `docs/index` response body into a batch summary.
pub fn parse_index_response(body: &str) -> Result<BatchOperationSummary, SearchIndexError> {
    let response: IndexBatchResponse =
        serde_json::from_str(body).map_err(|e| SearchIndexError::parse(e.to_string()))?;

    let results = response
        .value
        .into_iter()
        .map(|item| {
            let error = if item.status {
                None
            } else {
                Some(SearchIndexError::index(format!(
                    "status {}: {}",
                    item.status_code.unwrap_or_default(),
                    item.error_message.unwrap_or_default()
                )))
            };
            BatchOperationResult {
                id: item.key,
                success: item.status,
                error,
            }
        })
        .collect();

    Ok(BatchOperationSummary::from_results(results))
}

/// Parse a `docs/search` response body into hits.
pub fn parse_search_response(body: &str) -> Result<Vec<DocumentHit>, SearchIndexError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchIndexError::parse(e.to_string()))?;
    Ok(response.value)
}

/// Parse a `docs/$count` response body.
///
/// The service answers with a bare number, sometimes preceded by a byte
/// order mark.
pub fn parse_count_response(body: &str) -> Result<u64, SearchIndexError> {
    body.trim_start_matches('\u{feff}')
        .trim()
        .parse::<u64>()
        .map_err(|e| SearchIndexError::parse(format!("Invalid document count {:?}: {}", body, e)))
}
