//! Document storage client.
//!
//! Moves local files in and out of a blob container. Local path checks and
//! directory scans happen here; the provider only sees blob names and bytes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::errors::StorageError;
use crate::interfaces::BlobStoreProvider;
use legal_indexer_shared::is_supported_extension;

/// Main entry point for blob storage used by the ingestion pipeline.
#[derive(Clone)]
pub struct DocumentStorage {
    provider: Arc<dyn BlobStoreProvider>,
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Map a missing path to `NotFound`, keep other IO errors as they are.
fn io_error(err: std::io::Error, path: &Path) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::not_found(path.display().to_string())
    } else {
        StorageError::IoError(err)
    }
}

impl DocumentStorage {
    pub fn new(provider: Arc<dyn BlobStoreProvider>) -> Self {
        Self { provider }
    }

    pub fn container_name(&self) -> &str {
        self.provider.container_name()
    }

    pub fn backend_name(&self) -> &str {
        self.provider.backend_name()
    }

    /// Create the container if it does not exist. Safe to call repeatedly.
    pub async fn ensure_container(&self) -> Result<(), StorageError> {
        self.provider.ensure_container().await
    }

    /// Upload a local file, replacing any blob of the same name.
    ///
    /// # Arguments
    ///
    /// * `local_path` - File to upload
    /// * `blob_name` - Target name; defaults to the file's base name
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The blob name written
    /// * `Err(StorageError::NotFound)` - If `local_path` does not exist
    #[instrument(skip(self), fields(backend = %self.backend_name()))]
    pub async fn upload(
        &self,
        local_path: &Path,
        blob_name: Option<&str>,
    ) -> Result<String, StorageError> {
        let data = tokio::fs::read(local_path)
            .await
            .map_err(|e| io_error(e, local_path))?;

        let blob_name = match blob_name {
            Some(name) => name.to_string(),
            None => base_name(local_path).ok_or_else(|| {
                StorageError::configuration(format!(
                    "Cannot derive a blob name from {}",
                    local_path.display()
                ))
            })?,
        };

        self.provider.put_blob(&blob_name, data).await?;
        info!(blob_name = %blob_name, "Uploaded file");
        Ok(blob_name)
    }

    /// Upload every supported file directly inside `dir`.
    ///
    /// Subdirectories and unsupported extensions are skipped. A file that
    /// fails to upload is logged and left out of the result; it does not stop
    /// the rest of the directory.
    pub async fn upload_directory(&self, dir: &Path) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| io_error(e, dir))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cannot stat entry");
                    continue;
                }
            }
            match base_name(&path) {
                Some(name) if is_supported_extension(&name) => files.push(path),
                _ => debug!(path = %path.display(), "Skipping unsupported file"),
            }
        }
        files.sort();

        let mut uploaded = Vec::with_capacity(files.len());
        for path in files {
            match self.upload(&path, None).await {
                Ok(name) => uploaded.push(name),
                Err(e) => error!(path = %path.display(), error = %e, "Failed to upload file"),
            }
        }

        info!(
            directory = %dir.display(),
            uploaded = uploaded.len(),
            "Directory upload finished"
        );
        Ok(uploaded)
    }

    /// Names of all blobs in the container.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        self.provider.list_blobs().await
    }

    /// URL of a blob. The blob does not have to exist.
    pub fn url_for(&self, blob_name: &str) -> String {
        self.provider.blob_url(blob_name)
    }

    /// Download a blob to `dest`, creating parent directories as needed.
    pub async fn download(&self, blob_name: &str, dest: &Path) -> Result<PathBuf, StorageError> {
        let data = self.provider.get_blob(blob_name).await?;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &data).await?;

        info!(blob_name = %blob_name, dest = %dest.display(), size = data.len(), "Downloaded blob");
        Ok(dest.to_path_buf())
    }

    pub async fn delete(&self, blob_name: &str) -> Result<(), StorageError> {
        self.provider.delete_blob(blob_name).await.inspect_err(|e| {
            if !e.is_not_found() {
                warn!(blob_name = %blob_name, error = %e, "Failed to delete blob");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBlobStore;
    use async_trait::async_trait;
    use tempfile::TempDir;

    fn mock_storage() -> DocumentStorage {
        DocumentStorage::new(Arc::new(MockBlobStore::new(
            "https://files.test",
            "legal-documents",
        )))
    }

    /// Rejects every upload whose name contains "bad".
    struct FlakyStore(MockBlobStore);

    #[async_trait]
    impl BlobStoreProvider for FlakyStore {
        fn backend_name(&self) -> &str {
            "flaky"
        }
        fn container_name(&self) -> &str {
            self.0.container_name()
        }
        async fn ensure_container(&self) -> Result<(), StorageError> {
            Ok(())
        }
        async fn put_blob(&self, blob_name: &str, data: Vec<u8>) -> Result<(), StorageError> {
            if blob_name.contains("bad") {
                return Err(StorageError::backend("Mock failure"));
            }
            self.0.put_blob(blob_name, data).await
        }
        async fn get_blob(&self, blob_name: &str) -> Result<Vec<u8>, StorageError> {
            self.0.get_blob(blob_name).await
        }
        async fn list_blobs(&self) -> Result<Vec<String>, StorageError> {
            self.0.list_blobs().await
        }
        async fn delete_blob(&self, blob_name: &str) -> Result<(), StorageError> {
            self.0.delete_blob(blob_name).await
        }
        fn blob_url(&self, blob_name: &str) -> String {
            self.0.blob_url(blob_name)
        }
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_upload_defaults_to_base_name() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "lease.txt", "terms");
        let storage = mock_storage();

        let name = storage.upload(&path, None).await.unwrap();

        assert_eq!(name, "lease.txt");
        assert_eq!(storage.list().await.unwrap(), vec!["lease.txt"]);
        assert_eq!(storage.url_for(&name), "https://files.test/lease.txt");
    }

    #[tokio::test]
    async fn test_upload_with_explicit_name() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "lease.txt", "terms");
        let storage = mock_storage();

        let name = storage.upload(&path, Some("2024/lease.txt")).await.unwrap();

        assert_eq!(name, "2024/lease.txt");
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = mock_storage();

        let err = storage
            .upload(&dir.path().join("missing.pdf"), None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_directory_skips_unsupported_and_subdirs() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.pdf", "pdf");
        write(&dir, "b.txt", "text");
        write(&dir, "c.md", "notes");
        write(&dir, "image.png", "png");
        write(&dir, "data.csv", "1,2");
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();
        std::fs::write(dir.path().join("nested.txt").join("inner.txt"), "x").unwrap();

        let storage = mock_storage();
        let uploaded = storage.upload_directory(dir.path()).await.unwrap();

        assert_eq!(uploaded, vec!["a.pdf", "b.txt", "c.md"]);
        let listed = storage.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(!listed.iter().any(|n| n == "image.png" || n == "data.csv"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_upload_directory_follows_symlinks_and_skips_dangling() {
        let originals = TempDir::new().unwrap();
        let target = write(&originals, "lease.txt", "terms");
        let dir = TempDir::new().unwrap();
        write(&dir, "brief.md", "notes");
        std::os::unix::fs::symlink(&target, dir.path().join("lease.txt")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt"))
            .unwrap();

        let uploaded = mock_storage().upload_directory(dir.path()).await.unwrap();

        assert_eq!(uploaded, vec!["brief.md", "lease.txt"]);
    }

    #[tokio::test]
    async fn test_upload_directory_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.txt", "x");
        write(&dir, "good.txt", "y");
        let storage = DocumentStorage::new(Arc::new(FlakyStore(MockBlobStore::default())));

        let uploaded = storage.upload_directory(dir.path()).await.unwrap();

        assert_eq!(uploaded, vec!["good.txt"]);
    }

    #[tokio::test]
    async fn test_upload_directory_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = mock_storage()
            .upload_directory(&dir.path().join("nope"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_download_from_mock_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "lease.txt", "terms");
        let storage = mock_storage();
        storage.upload(&path, None).await.unwrap();

        let dest = dir.path().join("out").join("lease.txt");
        let written = storage.download("lease.txt", &dest).await.unwrap();

        assert_eq!(written, dest);
        assert_eq!(std::fs::read(&dest).unwrap(), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn test_download_unknown_blob() {
        let dir = TempDir::new().unwrap();
        let err = mock_storage()
            .download("missing.txt", &dir.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_ensure_container_twice() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "lease.txt", "terms");
        let storage = mock_storage();

        storage.ensure_container().await.unwrap();
        storage.upload(&path, None).await.unwrap();
        storage.ensure_container().await.unwrap();

        assert_eq!(storage.list().await.unwrap(), vec!["lease.txt"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "lease.txt", "terms");
        let storage = mock_storage();
        storage.upload(&path, None).await.unwrap();

        storage.delete("lease.txt").await.unwrap();

        assert!(storage.list().await.unwrap().is_empty());
        assert!(storage.delete("lease.txt").await.unwrap_err().is_not_found());
    }
}
