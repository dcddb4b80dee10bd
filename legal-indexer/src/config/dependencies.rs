//! Dependency initialization and wiring for the legal indexer.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Settings;
use crate::IndexerError;
use legal_indexer_ingest::Orchestrator;
use legal_indexer_repository::{
    AzureSearchConfig, AzureSearchProvider, SearchIndexClient, SearchIndexConfig,
    SearchIndexProvider,
};
use legal_indexer_storage::{
    AzureBlobConfig, AzureBlobStore, BlobStoreProvider, DocumentStorage, MockBlobStore,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator, with container and index in place.
    pub orchestrator: Orchestrator,
}

/// Pick the blob store: Azure when configured, otherwise the in-memory mock.
pub fn storage_provider(settings: &Settings) -> Result<Arc<dyn BlobStoreProvider>, IndexerError> {
    match &settings.storage_account_url {
        Some(account_url) if settings.validate_storage() => {
            let mut config =
                AzureBlobConfig::new(account_url.clone(), settings.storage_container_name.clone());
            if let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
                &settings.azure_tenant_id,
                &settings.azure_client_id,
                &settings.azure_client_secret,
            ) {
                config = config.with_service_principal(
                    tenant_id.clone(),
                    client_id.clone(),
                    client_secret.clone(),
                );
            }

            let store = AzureBlobStore::new(config).map_err(|e| {
                IndexerError::config(format!("Failed to create blob storage client: {}", e))
            })?;
            Ok(Arc::new(store))
        }
        _ => {
            warn!(
                base_url = %settings.mock_storage_base_url,
                "AZURE_STORAGE_ACCOUNT_URL not set, using in-memory mock storage"
            );
            Ok(Arc::new(MockBlobStore::new(
                &settings.mock_storage_base_url,
                settings.storage_container_name.clone(),
            )))
        }
    }
}

/// Build the Azure Cognitive Search provider. Search settings are required.
pub fn search_provider(settings: &Settings) -> Result<Arc<dyn SearchIndexProvider>, IndexerError> {
    let (endpoint, api_key) = match (&settings.search_endpoint, &settings.search_api_key) {
        (Some(endpoint), Some(api_key)) if settings.validate_search() => (endpoint, api_key),
        _ => {
            return Err(IndexerError::config(
                "Azure Cognitive Search configuration missing. Set AZURE_SEARCH_SERVICE_ENDPOINT and AZURE_SEARCH_API_KEY.",
            ))
        }
    };

    let config = AzureSearchConfig::new(
        endpoint.clone(),
        api_key.clone(),
        settings.search_index_name.clone(),
    )
    .with_api_version(settings.search_api_version.clone());

    let provider = AzureSearchProvider::new(config).map_err(|e| {
        IndexerError::config(format!("Failed to create search client: {}", e))
    })?;
    Ok(Arc::new(provider))
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexerError)` - If search settings are missing, a client cannot
    ///   be built, or the container or index cannot be created
    pub async fn new(settings: &Settings) -> Result<Self, IndexerError> {
        info!(settings = ?settings, "Initializing dependencies");

        let search = search_provider(settings)?;
        let storage = storage_provider(settings)?;

        let search_config = SearchIndexConfig::from_limit(settings.search_max_batch_size);

        Self::from_providers(storage, search, search_config).await
    }

    /// Wire the orchestrator around already-built providers and make sure
    /// the container and index exist.
    pub async fn from_providers(
        storage: Arc<dyn BlobStoreProvider>,
        search: Arc<dyn SearchIndexProvider>,
        search_config: SearchIndexConfig,
    ) -> Result<Self, IndexerError> {
        let orchestrator = Orchestrator::new(
            DocumentStorage::new(storage),
            SearchIndexClient::with_config(search, search_config),
        );
        orchestrator.initialize().await?;

        info!("Dependencies initialized");
        Ok(Self { orchestrator })
    }
}
