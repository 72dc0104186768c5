//! In-memory implementations of the remote traits.
//!
//! Used by the test suites and for wiring the service without credentials
//! during local development. Both types are cheap to share behind an `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::object_store::{ArchiveError, ObjectStore, RemoteFile, RemoteFolder};
use crate::sheet::{SheetError, Worksheet};

#[derive(Default)]
struct StoredFolder {
    name: String,
    parent: Option<String>,
}

/// In-memory [`ObjectStore`].
#[derive(Default)]
pub struct MemoryObjectStore {
    folders: Mutex<HashMap<String, StoredFolder>>,
    files: Mutex<HashMap<String, (String, Vec<u8>)>>,
    next_id: AtomicU64,
    fail_uploads: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent uploads fail, for exercising the soft-failure path.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    fn make_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub async fn folder_count(&self) -> usize {
        self.folders.lock().await.len()
    }

    pub async fn file_count(&self) -> usize {
        self.files.lock().await.len()
    }

    /// Names of files stored under the folder with the given name.
    pub async fn file_names_in(&self, folder_name: &str) -> Vec<String> {
        let folders = self.folders.lock().await;
        let folder_id = folders
            .iter()
            .find(|(_, f)| f.name == folder_name)
            .map(|(id, _)| id.clone());
        drop(folders);

        let Some(folder_id) = folder_id else {
            return vec![];
        };

        self.files
            .lock()
            .await
            .iter()
            .filter(|(_, (parent, _))| parent == &folder_id)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn find_folders(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<Vec<RemoteFolder>, ArchiveError> {
        let folders = self.folders.lock().await;
        Ok(folders
            .iter()
            .filter(|(_, f)| f.name == name && f.parent.as_deref() == parent)
            .map(|(id, _)| RemoteFolder { id: id.clone() })
            .collect())
    }

    async fn create_folder(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<RemoteFolder, ArchiveError> {
        let id = self.make_id("folder");
        self.folders.lock().await.insert(
            id.clone(),
            StoredFolder {
                name: name.to_string(),
                parent: parent.map(String::from),
            },
        );
        Ok(RemoteFolder { id })
    }

    async fn upload(
        &self,
        name: &str,
        folder_id: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> Result<RemoteFile, ArchiveError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(ArchiveError::Api {
                status: 503,
                message: "upload disabled".to_string(),
            });
        }

        let id = self.make_id("file");
        self.files
            .lock()
            .await
            .insert(name.to_string(), (folder_id.to_string(), data));
        Ok(RemoteFile {
            view_link: format!("https://archive.example/view/{}", id),
            id,
        })
    }
}

/// In-memory [`Worksheet`].
#[derive(Default)]
pub struct MemoryWorksheet {
    rows: Mutex<Vec<Vec<String>>>,
    fail_inserts: AtomicBool,
}

impl MemoryWorksheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing rows (e.g. a worksheet with a stale header).
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_inserts: AtomicBool::new(false),
        }
    }

    /// Make positional inserts fail, for exercising the append fallback.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub async fn all_rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl Worksheet for MemoryWorksheet {
    async fn row(&self, index: u32) -> Result<Option<Vec<String>>, SheetError> {
        let rows = self.rows.lock().await;
        Ok(rows.get(index as usize - 1).cloned())
    }

    async fn row_count(&self) -> Result<u32, SheetError> {
        Ok(self.rows.lock().await.len() as u32)
    }

    async fn insert_row(&self, index: u32, cells: &[String]) -> Result<(), SheetError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(SheetError::Api {
                status: 503,
                message: "insert disabled".to_string(),
            });
        }

        let mut rows = self.rows.lock().await;
        let at = (index as usize - 1).min(rows.len());
        rows.insert(at, cells.to_vec());
        Ok(())
    }

    async fn append_row(&self, cells: &[String]) -> Result<(), SheetError> {
        self.rows.lock().await.push(cells.to_vec());
        Ok(())
    }

    async fn delete_row(&self, index: u32) -> Result<(), SheetError> {
        let mut rows = self.rows.lock().await;
        let at = index as usize - 1;
        if at < rows.len() {
            rows.remove(at);
        }
        Ok(())
    }
}
