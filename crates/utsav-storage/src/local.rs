use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use utsav_core::models::District;

use crate::keys;
use crate::traits::{Storage, StorageBackend, StorageError, StorageResult, StoredFile};

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for attachments (e.g., "uploads")
    /// * `base_url` - Base URL the files are served under
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that
    /// would resolve outside the storage root.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        keys::check_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        district: District,
        stored_name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredFile> {
        let key = keys::submission_key(district, stored_name);
        let path = self.key_to_path(&key)?;
        let size = data.len() as u64;

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            district = %district,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage store successful"
        );

        Ok(StoredFile {
            key,
            url,
            size_bytes: size,
        })
    }

    async fn load(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            "Local storage load successful"
        );

        Ok(data)
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            "Local storage delete successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:8080/uploads".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_store_and_load() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let data = b"festival photo".to_vec();
        let stored = storage
            .store(
                District::Hyderabad,
                "20260714_093005_bonalu.jpg",
                "image/jpeg",
                data.clone(),
            )
            .await
            .unwrap();

        assert_eq!(stored.key, "Hyderabad/20260714_093005_bonalu.jpg");
        assert!(stored.url.ends_with("/Hyderabad/20260714_093005_bonalu.jpg"));
        assert_eq!(stored.size_bytes, data.len() as u64);

        // File lands under the district directory on disk
        assert!(dir
            .path()
            .join("Hyderabad/20260714_093005_bonalu.jpg")
            .is_file());

        let loaded = storage.load(&stored.key).await.unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn test_district_directory_created_on_demand() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        assert!(!dir.path().join("Mulugu").exists());
        storage
            .store(District::Mulugu, "20260714_093005_a.png", "image/png", vec![1])
            .await
            .unwrap();
        assert!(dir.path().join("Mulugu").is_dir());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage.load("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        assert!(storage.delete("Hyderabad/missing.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let stored = storage
            .store(District::Warangal, "20260714_093005_a.txt", "text/plain", b"x".to_vec())
            .await
            .unwrap();

        assert!(storage.exists(&stored.key).await.unwrap());
        assert!(!storage.exists("Warangal/other.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage.load("Hyderabad/missing.jpg").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
