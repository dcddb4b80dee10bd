use std::sync::Arc;

use azure_core::credentials::{Secret, TokenCredential};
use tracing::{debug, info};

use crate::azure::config::AzureBlobConfig;
use crate::errors::StorageError;

/// Pick the credential for a blob container.
///
/// A SAS in the account URL needs no token credential, so `None` is
/// returned. With tenant, client id and secret all present a
/// `ClientSecretCredential` is built; otherwise the Azure CLI login is used.
pub fn build_credential(
    config: &AzureBlobConfig,
) -> Result<Option<Arc<dyn TokenCredential>>, StorageError> {
    if config.has_sas() {
        info!("Using SAS from the storage account URL");
        return Ok(None);
    }

    if let (Some(tenant_id), Some(client_id), Some(client_secret)) =
        (&config.tenant_id, &config.client_id, &config.client_secret)
    {
        info!("Using service-principal credentials for Azure Blob Storage");
        debug!(tenant_id = %tenant_id, "Building ClientSecretCredential");

        let credential = azure_identity::ClientSecretCredential::new(
            tenant_id,
            client_id.clone(),
            Secret::new(client_secret.clone()),
            None,
        )
        .map_err(|e| StorageError::configuration(format!("Credential error: {}", e)))?;
        return Ok(Some(credential));
    }

    info!("Using AzureCliCredential for Azure Blob Storage");
    let credential = azure_identity::AzureCliCredential::new(None)
        .map_err(|e| StorageError::configuration(format!("Credential error: {}", e)))?;
    Ok(Some(credential))
}
