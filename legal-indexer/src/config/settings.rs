//! Settings read from the environment.

use legal_indexer_repository::azure::DEFAULT_API_VERSION;
use legal_indexer_repository::AZURE_MAX_BATCH_SIZE;
use legal_indexer_storage::DEFAULT_MOCK_BASE_URL;

/// Default blob container name.
pub const DEFAULT_CONTAINER_NAME: &str = "legal-documents";

/// Default search index name.
pub const DEFAULT_INDEX_NAME: &str = "legal-documents-index";

/// Connection settings for both backends, captured once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Blob service URL; a SAS query string in it is the credential.
    pub storage_account_url: Option<String>,
    pub storage_container_name: String,
    pub azure_tenant_id: Option<String>,
    pub azure_client_id: Option<String>,
    pub azure_client_secret: Option<String>,
    pub search_endpoint: Option<String>,
    pub search_api_key: Option<String>,
    pub search_index_name: String,
    pub search_api_version: String,
    /// Largest upsert batch; `0` disables the limit.
    pub search_max_batch_size: usize,
    /// Base URL reported by the mock store when Azure storage is not configured.
    pub mock_storage_base_url: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Settings")
            .field("storage_account_url", &redact(&self.storage_account_url))
            .field("storage_container_name", &self.storage_container_name)
            .field("azure_tenant_id", &self.azure_tenant_id)
            .field("azure_client_id", &redact(&self.azure_client_id))
            .field("azure_client_secret", &redact(&self.azure_client_secret))
            .field("search_endpoint", &self.search_endpoint)
            .field("search_api_key", &redact(&self.search_api_key))
            .field("search_index_name", &self.search_index_name)
            .field("search_api_version", &self.search_api_version)
            .field("search_max_batch_size", &self.search_max_batch_size)
            .field("mock_storage_base_url", &self.mock_storage_base_url)
            .finish()
    }
}

impl Settings {
    /// Read settings from the process environment, after loading `.env` if
    /// one exists.
    ///
    /// # Environment Variables
    ///
    /// - `AZURE_STORAGE_ACCOUNT_URL`: blob service URL, optionally with a SAS
    /// - `AZURE_STORAGE_CONTAINER_NAME`: blob container (default: legal-documents)
    /// - `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`, `AZURE_CLIENT_SECRET`: service
    ///   principal for storage when the URL has no SAS
    /// - `AZURE_SEARCH_SERVICE_ENDPOINT`: search service URL
    /// - `AZURE_SEARCH_API_KEY`: search admin key
    /// - `AZURE_SEARCH_INDEX_NAME`: index name (default: legal-documents-index)
    /// - `AZURE_SEARCH_API_VERSION`: REST API version (default: 2023-11-01)
    /// - `AZURE_SEARCH_MAX_BATCH_SIZE`: upsert batch limit, 0 for none (default: 1000)
    /// - `MOCK_STORAGE_BASE_URL`: mock store URL prefix (default: https://mock-storage.local/)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            storage_account_url: get("AZURE_STORAGE_ACCOUNT_URL"),
            storage_container_name: get_or("AZURE_STORAGE_CONTAINER_NAME", DEFAULT_CONTAINER_NAME),
            azure_tenant_id: get("AZURE_TENANT_ID"),
            azure_client_id: get("AZURE_CLIENT_ID"),
            azure_client_secret: get("AZURE_CLIENT_SECRET"),
            search_endpoint: get("AZURE_SEARCH_SERVICE_ENDPOINT"),
            search_api_key: get("AZURE_SEARCH_API_KEY"),
            search_index_name: get_or("AZURE_SEARCH_INDEX_NAME", DEFAULT_INDEX_NAME),
            search_api_version: get_or("AZURE_SEARCH_API_VERSION", DEFAULT_API_VERSION),
            search_max_batch_size: get("AZURE_SEARCH_MAX_BATCH_SIZE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(AZURE_MAX_BATCH_SIZE),
            mock_storage_base_url: get_or("MOCK_STORAGE_BASE_URL", DEFAULT_MOCK_BASE_URL),
        }
    }

    /// True when every storage setting is present.
    pub fn validate_storage(&self) -> bool {
        self.storage_account_url.is_some() && !self.storage_container_name.is_empty()
    }

    /// True when every search setting is present.
    pub fn validate_search(&self) -> bool {
        self.search_endpoint.is_some()
            && self.search_api_key.is_some()
            && !self.search_index_name.is_empty()
    }

    pub fn validate_all(&self) -> bool {
        self.validate_storage() && self.validate_search()
    }
}
