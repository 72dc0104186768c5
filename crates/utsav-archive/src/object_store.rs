//! Object store client.
//!
//! Folder lookup/creation and file upload against a Drive-style REST API.
//! The remote service owns chunking and resumability; this client sends
//! one multipart request per file.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Object store rejected the request: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed object store response: {0}")]
    Malformed(String),
}

/// A folder in the remote object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFolder {
    pub id: String,
}

/// A file uploaded to the remote object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    /// Human-facing view link; stored in the ledger, never re-parsed.
    pub view_link: String,
}

/// Object store abstraction. Folder lookup is by exact name, scoped to
/// non-trashed items under the given parent.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn find_folders(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<Vec<RemoteFolder>, ArchiveError>;

    async fn create_folder(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<RemoteFolder, ArchiveError>;

    async fn upload(
        &self,
        name: &str,
        folder_id: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<RemoteFile, ArchiveError>;
}

// REST payloads

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileResource>,
}

#[derive(Debug, Deserialize)]
struct FileResource {
    id: String,
    #[serde(rename = "webViewLink")]
    web_view_link: Option<String>,
}

#[derive(Debug, Serialize)]
struct FolderMetadata<'a> {
    name: &'a str,
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
struct UploadMetadata<'a> {
    name: &'a str,
    parents: Vec<&'a str>,
}

/// HTTP implementation of [`ObjectStore`].
#[derive(Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    api_url: String,
    upload_url: String,
    token: String,
}

impl HttpObjectStore {
    pub fn new(
        api_url: String,
        upload_url: String,
        token: String,
    ) -> Result<Self, ArchiveError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_url,
            upload_url,
            token,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ArchiveError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ArchiveError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn find_folders(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<Vec<RemoteFolder>, ArchiveError> {
        // Single quotes inside names would break the query expression.
        let escaped = name.replace('\'', "\\'");
        let mut query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            escaped, FOLDER_MIME_TYPE
        );
        if let Some(parent) = parent {
            query.push_str(&format!(" and '{}' in parents", parent));
        }

        let response = self
            .client
            .get(format!("{}/files", self.api_url))
            .bearer_auth(&self.token)
            .query(&[("q", query.as_str()), ("fields", "files(id, name)")])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let list: FileList = response
            .json()
            .await
            .map_err(|e| ArchiveError::Malformed(e.to_string()))?;

        Ok(list
            .files
            .into_iter()
            .map(|f| RemoteFolder { id: f.id })
            .collect())
    }

    async fn create_folder(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<RemoteFolder, ArchiveError> {
        let metadata = FolderMetadata {
            name,
            mime_type: FOLDER_MIME_TYPE,
            parents: parent.map(|p| vec![p]),
        };

        let response = self
            .client
            .post(format!("{}/files", self.api_url))
            .bearer_auth(&self.token)
            .query(&[("fields", "id")])
            .json(&metadata)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let created: FileResource = response
            .json()
            .await
            .map_err(|e| ArchiveError::Malformed(e.to_string()))?;

        tracing::info!(folder = %name, folder_id = %created.id, "Remote folder created");

        Ok(RemoteFolder { id: created.id })
    }

    async fn upload(
        &self,
        name: &str,
        folder_id: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<RemoteFile, ArchiveError> {
        let metadata = UploadMetadata {
            name,
            parents: vec![folder_id],
        };
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| ArchiveError::Malformed(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part(
                "metadata",
                reqwest::multipart::Part::text(metadata_json)
                    .mime_str("application/json")
                    .map_err(|e| ArchiveError::Malformed(e.to_string()))?,
            )
            .part(
                "media",
                reqwest::multipart::Part::bytes(data)
                    .file_name(name.to_string())
                    .mime_str(content_type)
                    .map_err(|e| ArchiveError::Malformed(e.to_string()))?,
            );

        let response = self
            .client
            .post(format!("{}/files", self.upload_url))
            .bearer_auth(&self.token)
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id, webViewLink"),
            ])
            .multipart(form)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let uploaded: FileResource = response
            .json()
            .await
            .map_err(|e| ArchiveError::Malformed(e.to_string()))?;

        let view_link = uploaded
            .web_view_link
            .ok_or_else(|| ArchiveError::Malformed("response is missing webViewLink".to_string()))?;

        Ok(RemoteFile {
            id: uploaded.id,
            view_link,
        })
    }
}
