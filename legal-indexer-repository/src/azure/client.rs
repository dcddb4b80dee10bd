//! Azure Cognitive Search client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! on top of the service's REST API, authenticated with an admin API key.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::azure::index_schema::index_definition;
use crate::azure::queries::{
    build_delete_batch, build_search_body, build_upload_batch, parse_count_response,
    parse_index_response, parse_search_response,
};
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::BatchOperationSummary;
use legal_indexer_shared::{DocumentHit, DocumentRecord, SearchQuery};

/// REST API version sent with every request unless overridden.
pub const DEFAULT_API_VERSION: &str = "2023-11-01";

/// Connection settings for an Azure Cognitive Search service.
#[derive(Clone)]
pub struct AzureSearchConfig {
    /// Service endpoint, e.g. `https://<service>.search.windows.net`.
    pub endpoint: String,
    /// Admin API key. Redacted in `Debug`.
    pub api_key: String,
    /// Name of the document index.
    pub index_name: String,
    /// REST API version.
    pub api_version: String,
}

impl std::fmt::Debug for AzureSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("index_name", &self.index_name)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl AzureSearchConfig {
    /// Create a config using [`DEFAULT_API_VERSION`].
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            index_name: index_name.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Override the REST API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

/// Azure Cognitive Search provider.
///
/// # Example
///
/// ```ignore
/// let config = AzureSearchConfig::new(
///     "https://my-service.search.windows.net",
///     api_key,
///     "legal-documents-index",
/// );
/// let provider = AzureSearchProvider::new(config)?;
/// provider.ensure_index().await?;
/// ```
pub struct AzureSearchProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    index_name: String,
    api_version: String,
}

impl AzureSearchProvider {
    /// Create a new provider for the configured service and index.
    ///
    /// No request is sent; call `ensure_index` to verify the service.
    ///
    /// # Returns
    ///
    /// * `Ok(AzureSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the endpoint is not a valid URL or the
    ///   HTTP client cannot be built
    pub fn new(config: AzureSearchConfig) -> Result<Self, SearchIndexError> {
        let parsed = Url::parse(&config.endpoint)
            .map_err(|e| SearchIndexError::connection(format!("Invalid endpoint: {}", e)))?;
        if config.api_key.is_empty() {
            return Err(SearchIndexError::connection("API key is empty"));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(
            endpoint = %parsed,
            index = %config.index_name,
            api_version = %config.api_version,
            "Created Azure Cognitive Search client"
        );

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            index_name: config.index_name,
            api_version: config.api_version,
        })
    }

    /// Build a request for `path` relative to the service root, with the API
    /// key and version attached.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}?api-version={}", self.base_url, path, self.api_version);
        self.client
            .request(method, url)
            .header("api-key", &self.api_key)
    }

    /// Path of a document inside the index, with the key URL-encoded.
    fn document_path(&self, id: &str) -> String {
        format!(
            "indexes/{}/docs/{}",
            self.index_name,
            utf8_percent_encode(id, NON_ALPHANUMERIC)
        )
    }

    async fn index_exists(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .request(Method::GET, &format!("indexes/{}", self.index_name))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SearchIndexError::connection(format!(
                    "Index lookup failed with status {}: {}",
                    status, body
                )))
            }
        }
    }

    /// Submit a `docs/index` batch and parse the per-item acknowledgments.
    ///
    /// The service answers 200 when every item succeeded and 207 when some
    /// failed; both carry per-item results.
    async fn submit_batch(&self, batch: &Value) -> Result<BatchOperationSummary, SearchIndexError> {
        let response = self
            .request(Method::POST, &format!("indexes/{}/docs/index", self.index_name))
            .json(batch)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_operation(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchIndexError::bulk_operation(e.to_string()))?;

        if status.is_success() {
            parse_index_response(&body)
        } else {
            error!(status = %status, body = %body, "Batch request failed");
            Err(SearchIndexError::bulk_operation(format!(
                "Batch failed with status {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl SearchIndexProvider for AzureSearchProvider {
    fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Create the index if it does not exist.
    ///
    /// A 409 from the create call means another writer created the index in
    /// between and is treated as success.
    #[instrument(skip(self), fields(index = %self.index_name))]
    async fn ensure_index(&self) -> Result<(), SearchIndexError> {
        if self.index_exists().await? {
            info!("Search index already exists");
            return Ok(());
        }

        let response = self
            .request(Method::POST, "indexes")
            .json(&index_definition(&self.index_name))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("Created search index");
            Ok(())
        } else if status == StatusCode::CONFLICT {
            info!("Search index already exists");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Failed to create search index");
            Err(SearchIndexError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, body
            )))
        }
    }

    async fn index_documents(
        &self,
        documents: &[DocumentRecord],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        let batch = build_upload_batch(documents)?;
        let summary = self.submit_batch(&batch).await?;
        debug!(
            total = summary.total,
            succeeded = summary.succeeded,
            "Upload batch acknowledged"
        );
        Ok(summary)
    }

    async fn delete_documents(
        &self,
        ids: &[String],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if ids.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.submit_batch(&build_delete_batch(ids))
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<DocumentHit>, SearchIndexError> {
        let response = self
            .request(Method::POST, &format!("indexes/{}/docs/search", self.index_name))
            .json(&build_search_body(query))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        match status {
            status if status.is_success() => parse_search_response(&body),
            StatusCode::BAD_REQUEST => Err(SearchIndexError::invalid_query(body)),
            status => Err(SearchIndexError::query(format!(
                "Search failed with status {}: {}",
                status, body
            ))),
        }
    }

    async fn get_document(&self, id: &str) -> Result<Option<DocumentRecord>, SearchIndexError> {
        let response = self
            .request(Method::GET, &self.document_path(id))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<DocumentRecord>()
                .await
                .map(Some)
                .map_err(|e| SearchIndexError::parse(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SearchIndexError::query(format!(
                    "Lookup failed with status {}: {}",
                    status, body
                )))
            }
        }
    }

    async fn count(&self) -> Result<u64, SearchIndexError> {
        let response = self
            .request(Method::GET, &format!("indexes/{}/docs/$count", self.index_name))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        if !status.is_success() {
            return Err(SearchIndexError::query(format!(
                "Count failed with status {}: {}",
                status, body
            )));
        }

        parse_count_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AzureSearchProvider {
        AzureSearchProvider::new(AzureSearchConfig::new(
            "https://legal.search.windows.net/",
            "secret",
            "legal-documents-index",
        ))
        .unwrap()
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let provider = provider();
        assert_eq!(provider.base_url, "https://legal.search.windows.net");
        assert_eq!(provider.index_name(), "legal-documents-index");
        assert_eq!(provider.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let result = AzureSearchProvider::new(AzureSearchConfig::new("not a url", "k", "idx"));
        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let result = AzureSearchProvider::new(AzureSearchConfig::new(
            "https://legal.search.windows.net",
            "",
            "idx",
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_document_path_encodes_key() {
        let provider = provider();
        assert_eq!(
            provider.document_path("abc123"),
            "indexes/legal-documents-index/docs/abc123"
        );
        assert_eq!(
            provider.document_path("a/b c"),
            "indexes/legal-documents-index/docs/a%2Fb%20c"
        );
    }

    #[test]
    fn test_request_carries_key_and_version() {
        let request = provider()
            .request(Method::GET, "indexes/legal-documents-index")
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://legal.search.windows.net/indexes/legal-documents-index?api-version=2023-11-01"
        );
        assert_eq!(request.headers()["api-key"], "secret");
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = AzureSearchConfig::new("https://x", "top-secret", "idx");
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("top-secret"));
    }
}
