//! Azure Blob Storage client implementation.

use async_trait::async_trait;
use azure_core::http::StatusCode;
use azure_storage_blob::{BlobContainerClient, BlobServiceClient};
use futures::TryStreamExt;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, error, info, instrument};

use crate::azure::auth::build_credential;
use crate::azure::config::AzureBlobConfig;
use crate::errors::StorageError;
use crate::interfaces::BlobStoreProvider;

/// Characters left unescaped in blob paths. `/` is kept so virtual
/// directories stay readable.
const BLOB_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Azure Blob Storage provider bound to one container.
///
/// # Example
///
/// ```ignore
/// let config = AzureBlobConfig::new("https://acme.blob.core.windows.net", "legal-documents");
/// let store = AzureBlobStore::new(config)?;
/// store.ensure_container().await?;
/// ```
pub struct AzureBlobStore {
    service: BlobServiceClient,
    endpoint: String,
    container: String,
}

impl AzureBlobStore {
    /// Create a provider for the configured container.
    ///
    /// No request is sent; call `ensure_container` to verify access.
    pub fn new(config: AzureBlobConfig) -> Result<Self, StorageError> {
        config.validate()?;
        let credential = build_credential(&config)?;
        let endpoint = config.endpoint()?;

        let service = BlobServiceClient::new(config.account_url.as_str(), credential, None)
            .map_err(|e| StorageError::configuration(format!("Blob client error: {}", e)))?;

        info!(
            endpoint = %endpoint,
            container = %config.container,
            "Created Azure Blob Storage client"
        );

        Ok(Self {
            service,
            endpoint,
            container: config.container,
        })
    }

    fn container_client(&self) -> BlobContainerClient {
        self.service.blob_container_client(&self.container)
    }
}

/// Map an SDK error onto a storage error. 404 becomes `NotFound`; errors
/// without an HTTP status never reached the service.
fn storage_error(err: azure_core::Error, what: &str) -> StorageError {
    match err.http_status() {
        Some(StatusCode::NotFound) => StorageError::not_found(what.to_string()),
        Some(status) => {
            error!(status = ?status, error = %err, "Blob request failed");
            StorageError::backend(format!("{} ({:?}): {}", what, status, err))
        }
        None => {
            error!(error = %err, "Blob request did not reach the service");
            StorageError::connection(format!("{}: {}", what, err))
        }
    }
}

#[async_trait]
impl BlobStoreProvider for AzureBlobStore {
    fn backend_name(&self) -> &str {
        "azure"
    }

    fn container_name(&self) -> &str {
        &self.container
    }

    #[instrument(skip(self), fields(container = %self.container))]
    async fn ensure_container(&self) -> Result<(), StorageError> {
        match self.container_client().create(None).await {
            Ok(_) => {
                info!("Created blob container");
                Ok(())
            }
            Err(e) if e.http_status() == Some(StatusCode::Conflict) => {
                debug!("Blob container already exists");
                Ok(())
            }
            Err(e) => Err(storage_error(e, &self.container)),
        }
    }

    async fn put_blob(&self, blob_name: &str, data: Vec<u8>) -> Result<(), StorageError> {
        let size = data.len() as u64;
        let body: azure_core::Bytes = data.into();

        self.service
            .blob_client(&self.container, blob_name)
            .upload(body.into(), true, size, None)
            .await
            .map_err(|e| storage_error(e, blob_name))?;

        debug!(blob_name = %blob_name, size, "Uploaded blob");
        Ok(())
    }

    async fn get_blob(&self, blob_name: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .service
            .blob_client(&self.container, blob_name)
            .download(None)
            .await
            .map_err(|e| storage_error(e, blob_name))?;

        let body: azure_core::Bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| storage_error(e, blob_name))?;
        Ok(body.to_vec())
    }

    async fn list_blobs(&self) -> Result<Vec<String>, StorageError> {
        let mut pages = self
            .container_client()
            .list_blobs(None)
            .map_err(|e| storage_error(e, &self.container))?
            .into_pages();

        let mut names = Vec::new();
        while let Some(page) = pages
            .try_next()
            .await
            .map_err(|e| storage_error(e, &self.container))?
        {
            let segment = page
                .into_model()
                .map_err(|e| storage_error(e, &self.container))?;
            names.extend(
                segment
                    .segment
                    .blob_items
                    .into_iter()
                    .filter_map(|item| item.name.and_then(|name| name.content)),
            );
        }

        Ok(names)
    }

    async fn delete_blob(&self, blob_name: &str) -> Result<(), StorageError> {
        self.service
            .blob_client(&self.container, blob_name)
            .delete(None)
            .await
            .map_err(|e| storage_error(e, blob_name))?;

        debug!(blob_name = %blob_name, "Deleted blob");
        Ok(())
    }

    fn blob_url(&self, blob_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint,
            self.container,
            utf8_percent_encode(blob_name, BLOB_PATH)
        )
    }
}
