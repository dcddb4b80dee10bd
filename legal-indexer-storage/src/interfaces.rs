//! Object store provider trait definition.
//!
//! The trait covers raw blob operations only. Local file handling (reading
//! the upload source, writing the download target, directory scans) lives in
//! `DocumentStorage` so every backend shares it.

use async_trait::async_trait;

use crate::errors::StorageError;

/// Abstracts the underlying blob container.
#[async_trait]
pub trait BlobStoreProvider: Send + Sync {
    /// Short name of the backend, used in logs and statistics.
    fn backend_name(&self) -> &str;

    fn container_name(&self) -> &str;

    /// Create the container if it does not exist yet.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the container exists or was created
    /// * `Err(StorageError)` - On any failure other than "already exists"
    async fn ensure_container(&self) -> Result<(), StorageError>;

    /// Write a blob, replacing any existing blob of the same name.
    async fn put_blob(&self, blob_name: &str, data: Vec<u8>) -> Result<(), StorageError>;

    /// Read a blob. Fails with `NotFound` if it does not exist.
    async fn get_blob(&self, blob_name: &str) -> Result<Vec<u8>, StorageError>;

    /// Names of every blob in the container.
    async fn list_blobs(&self) -> Result<Vec<String>, StorageError>;

    /// Remove a blob. Fails with `NotFound` if it does not exist.
    async fn delete_blob(&self, blob_name: &str) -> Result<(), StorageError>;

    /// URL of a blob. Does not check that the blob exists.
    fn blob_url(&self, blob_name: &str) -> String;
}
