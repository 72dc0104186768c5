//! Best-effort mirroring of attachments into the remote object store.

use std::sync::Arc;

use utsav_core::models::District;
use utsav_core::RetryPolicy;

use crate::object_store::{ArchiveError, ObjectStore, RemoteFile, RemoteFolder};

/// Uploads attachments under `{root}/{district}` in the remote object
/// store, creating folders as needed.
///
/// Failures here are soft: the caller records a warning and continues with
/// no remote reference. Folder find-or-create is not atomic; if two
/// processes race, the first folder returned wins and a duplicate may
/// remain (the store offers no find-or-create primitive).
pub struct RemoteArchiver {
    store: Arc<dyn ObjectStore>,
    root_folder: String,
    retry: RetryPolicy,
}

impl RemoteArchiver {
    pub fn new(store: Arc<dyn ObjectStore>, root_folder: String, retry: RetryPolicy) -> Self {
        Self {
            store,
            root_folder,
            retry,
        }
    }

    /// Mirror one attachment. Returns the remote file reference on success.
    pub async fn archive(
        &self,
        district: District,
        stored_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<RemoteFile, ArchiveError> {
        let root = self.ensure_folder(&self.root_folder, None).await?;
        let district_folder = self
            .ensure_folder(district.as_str(), Some(&root.id))
            .await?;

        let file = self
            .retry
            .run("object_store.upload", || {
                self.store.upload(
                    stored_name,
                    &district_folder.id,
                    content_type,
                    data.to_vec(),
                )
            })
            .await?;

        tracing::info!(
            district = %district,
            stored_name = %stored_name,
            remote_id = %file.id,
            "Attachment mirrored to remote archive"
        );

        Ok(file)
    }

    /// Find a folder by exact name under `parent`, creating it when absent.
    /// If several folders share the name the first match is used.
    async fn ensure_folder(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<RemoteFolder, ArchiveError> {
        let matches = self
            .retry
            .run("object_store.find_folders", || {
                self.store.find_folders(name, parent)
            })
            .await?;

        if matches.len() > 1 {
            tracing::warn!(
                folder = %name,
                count = matches.len(),
                "Multiple remote folders share this name; using the first"
            );
        }

        if let Some(first) = matches.into_iter().next() {
            return Ok(first);
        }

        self.retry
            .run("object_store.create_folder", || {
                self.store.create_folder(name, parent)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryObjectStore;
    use std::time::Duration;

    fn archiver(store: Arc<MemoryObjectStore>) -> RemoteArchiver {
        RemoteArchiver::new(
            store,
            "Utsav Uploads".to_string(),
            RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(2)),
        )
    }

    #[tokio::test]
    async fn test_archive_creates_nested_folders() {
        let store = Arc::new(MemoryObjectStore::new());
        let archiver = archiver(store.clone());

        let file = archiver
            .archive(
                District::Hyderabad,
                "20260714_093005_bonalu.jpg",
                "image/jpeg",
                b"jpeg bytes",
            )
            .await
            .unwrap();

        assert!(!file.view_link.is_empty());
        assert_eq!(store.folder_count().await, 2); // root + district
        assert_eq!(store.file_count().await, 1);
    }

    #[tokio::test]
    async fn test_second_archive_reuses_folders() {
        let store = Arc::new(MemoryObjectStore::new());
        let archiver = archiver(store.clone());

        archiver
            .archive(District::Hyderabad, "a.jpg", "image/jpeg", b"one")
            .await
            .unwrap();
        archiver
            .archive(District::Hyderabad, "b.jpg", "image/jpeg", b"two")
            .await
            .unwrap();

        assert_eq!(store.folder_count().await, 2);
        assert_eq!(store.file_count().await, 2);
    }

    #[tokio::test]
    async fn test_districts_get_separate_folders() {
        let store = Arc::new(MemoryObjectStore::new());
        let archiver = archiver(store.clone());

        archiver
            .archive(District::Hyderabad, "a.jpg", "image/jpeg", b"one")
            .await
            .unwrap();
        archiver
            .archive(District::Warangal, "b.jpg", "image/jpeg", b"two")
            .await
            .unwrap();

        assert_eq!(store.folder_count().await, 3); // root + 2 districts
    }

    #[tokio::test]
    async fn test_upload_failure_surfaces_error() {
        let store = Arc::new(MemoryObjectStore::new());
        store.fail_uploads(true);
        let archiver = archiver(store.clone());

        let result = archiver
            .archive(District::Hyderabad, "a.jpg", "image/jpeg", b"one")
            .await;
        assert!(result.is_err());
    }
}
