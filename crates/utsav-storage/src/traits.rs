//! Storage abstraction trait
//!
//! Defines the trait every intake backend implements, so the submission
//! workflow never couples to filesystem details.

use async_trait::async_trait;
use thiserror::Error;
use utsav_core::models::District;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Available intake backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
}

/// Outcome of a successful store: the internal key and the URL the file is
/// served under.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub key: String,
    pub url: String,
    pub size_bytes: u64,
}

/// Intake storage abstraction.
///
/// **Key format:** keys are district-scoped: `{district}/{stored_name}`.
/// See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist an attachment under the district's directory and return the
    /// storage key and public URL.
    async fn store(
        &self,
        district: District,
        stored_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredFile>;

    /// Read a file back by its storage key.
    async fn load(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Delete a file by its storage key. Deleting a missing file is not an
    /// error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
