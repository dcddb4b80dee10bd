use url::Url;

use crate::errors::StorageError;

/// Connection settings for an Azure Blob Storage container.
///
/// `account_url` is the blob service endpoint, e.g.
/// `https://acme.blob.core.windows.net` or an Azurite URL. When it carries a
/// SAS query string the SAS is the credential; otherwise the service
/// principal fields are used, falling back to the Azure CLI login.
#[derive(Clone)]
pub struct AzureBlobConfig {
    pub account_url: String,
    pub container: String,
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl std::fmt::Debug for AzureBlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBlobConfig")
            .field("account_url", &self.endpoint().ok())
            .field("sas", &self.has_sas().then_some("[REDACTED]"))
            .field("container", &self.container)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id.as_ref().map(|_| "[REDACTED]"))
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl AzureBlobConfig {
    pub fn new(account_url: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            account_url: account_url.into(),
            container: container.into(),
            tenant_id: None,
            client_id: None,
            client_secret: None,
        }
    }

    /// Authenticate as a service principal instead of the CLI login.
    #[must_use]
    pub fn with_service_principal(
        mut self,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// The account URL as given, SAS included.
    pub fn service_url(&self) -> Result<Url, StorageError> {
        Url::parse(&self.account_url).map_err(|e| {
            StorageError::configuration(format!("Invalid storage account URL: {}", e))
        })
    }

    /// The account URL with any query string and trailing slash removed.
    pub fn endpoint(&self) -> Result<String, StorageError> {
        let mut url = self.service_url()?;
        url.set_query(None);
        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    pub fn has_sas(&self) -> bool {
        self.service_url()
            .map(|url| url.query().is_some_and(|q| !q.is_empty()))
            .unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        if self.container.is_empty() {
            return Err(StorageError::configuration("Container name is empty"));
        }
        let url = self.service_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StorageError::configuration(format!(
                "Storage account URL must be http(s), got {}",
                url.scheme()
            )));
        }
        Ok(())
    }
}
