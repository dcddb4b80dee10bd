//! In-memory blob store.
//!
//! Records blob names only. Bytes handed to `put_blob` are dropped, so a
//! download from this store always yields an empty file.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::StorageError;
use crate::interfaces::BlobStoreProvider;

pub const DEFAULT_MOCK_BASE_URL: &str = "https://mock-storage.local/";

pub struct MockBlobStore {
    base_url: String,
    container: String,
    names: Mutex<Vec<String>>,
}

impl MockBlobStore {
    /// `base_url` is normalized to end with exactly one `/`.
    pub fn new(base_url: &str, container: impl Into<String>) -> Self {
        Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            container: container.into(),
            names: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_BASE_URL, "mock-container")
    }
}

#[async_trait]
impl BlobStoreProvider for MockBlobStore {
    fn backend_name(&self) -> &str {
        "mock"
    }

    fn container_name(&self) -> &str {
        &self.container
    }

    async fn ensure_container(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn put_blob(&self, blob_name: &str, data: Vec<u8>) -> Result<(), StorageError> {
        let mut names = self.names.lock().await;
        if !names.iter().any(|n| n == blob_name) {
            names.push(blob_name.to_string());
        }
        debug!(blob_name = %blob_name, size = data.len(), "Recorded mock upload");
        Ok(())
    }

    async fn get_blob(&self, blob_name: &str) -> Result<Vec<u8>, StorageError> {
        if self.names.lock().await.iter().any(|n| n == blob_name) {
            Ok(Vec::new())
        } else {
            Err(StorageError::not_found(blob_name))
        }
    }

    async fn list_blobs(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.names.lock().await.clone())
    }

    async fn delete_blob(&self, blob_name: &str) -> Result<(), StorageError> {
        let mut names = self.names.lock().await;
        let before = names.len();
        names.retain(|n| n != blob_name);
        if names.len() == before {
            return Err(StorageError::not_found(blob_name));
        }
        Ok(())
    }

    fn blob_url(&self, blob_name: &str) -> String {
        format!("{}{}", self.base_url, blob_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_has_single_trailing_slash() {
        for base in ["https://files.test", "https://files.test/", "https://files.test///"] {
            let store = MockBlobStore::new(base, "docs");
            assert_eq!(store.blob_url("a.txt"), "https://files.test/a.txt");
        }
    }

    #[tokio::test]
    async fn test_put_deduplicates_and_keeps_order() {
        let store = MockBlobStore::default();

        store.put_blob("b.txt", b"1".to_vec()).await.unwrap();
        store.put_blob("a.txt", b"2".to_vec()).await.unwrap();
        store.put_blob("b.txt", b"3".to_vec()).await.unwrap();

        assert_eq!(store.list_blobs().await.unwrap(), vec!["b.txt", "a.txt"]);
    }

    #[tokio::test]
    async fn test_get_returns_empty_bytes() {
        let store = MockBlobStore::default();
        store.put_blob("a.txt", b"content".to_vec()).await.unwrap();

        assert!(store.get_blob("a.txt").await.unwrap().is_empty());
        assert!(store.get_blob("missing.txt").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MockBlobStore::default();
        store.put_blob("a.txt", Vec::new()).await.unwrap();

        store.delete_blob("a.txt").await.unwrap();

        assert!(store.list_blobs().await.unwrap().is_empty());
        assert!(store.delete_blob("a.txt").await.unwrap_err().is_not_found());
    }
}
