//! Tabular store client.
//!
//! Row-oriented access to one worksheet of one spreadsheet. The HTTP
//! implementation targets a Sheets-style values/batchUpdate REST API;
//! [`crate::memory::MemoryWorksheet`] implements the same trait for tests.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Right edge of the addressed cell range; one column per canonical header
/// cell (A through G).
const LAST_COLUMN: char = 'G';

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tabular store rejected the request: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed tabular store response: {0}")]
    Malformed(String),

    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),
}

/// One worksheet, addressed by 1-based row index.
#[async_trait]
pub trait Worksheet: Send + Sync {
    /// Read one row. `None` when the row is beyond the used range or fully
    /// empty.
    async fn row(&self, index: u32) -> Result<Option<Vec<String>>, SheetError>;

    /// Number of used rows (header included).
    async fn row_count(&self) -> Result<u32, SheetError>;

    /// Insert `cells` at `index`, shifting existing rows down.
    async fn insert_row(&self, index: u32, cells: &[String]) -> Result<(), SheetError>;

    /// Append `cells` wherever the store chooses.
    async fn append_row(&self, cells: &[String]) -> Result<(), SheetError>;

    /// Delete the row at `index`, shifting later rows up.
    async fn delete_row(&self, index: u32) -> Result<(), SheetError>;
}

// REST payloads

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

/// HTTP implementation of [`Worksheet`].
#[derive(Clone)]
pub struct HttpWorksheet {
    client: reqwest::Client,
    api_url: String,
    spreadsheet_id: String,
    title: String,
    /// Numeric sheet id, required by batchUpdate requests; resolved once at
    /// connect time from the worksheet title.
    sheet_id: i64,
    token: String,
}

impl HttpWorksheet {
    /// Connect to a worksheet, resolving its numeric sheet id from the
    /// spreadsheet metadata.
    pub async fn connect(
        api_url: String,
        spreadsheet_id: String,
        title: String,
        token: String,
    ) -> Result<Self, SheetError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;

        let response = client
            .get(format!("{}/spreadsheets/{}", api_url, spreadsheet_id))
            .bearer_auth(&token)
            .query(&[("fields", "sheets.properties(sheetId,title)")])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let metadata: SpreadsheetMetadata = response
            .json()
            .await
            .map_err(|e| SheetError::Malformed(e.to_string()))?;

        let sheet_id = metadata
            .sheets
            .iter()
            .find(|s| s.properties.title == title)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| SheetError::WorksheetNotFound(title.clone()))?;

        tracing::info!(
            spreadsheet_id = %spreadsheet_id,
            worksheet = %title,
            sheet_id = sheet_id,
            "Connected to submission ledger worksheet"
        );

        Ok(Self {
            client,
            api_url,
            spreadsheet_id,
            title,
            sheet_id,
            token,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SheetError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(SheetError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn range(&self, from_row: u32, to_row: u32) -> String {
        format!(
            "{}!A{}:{}{}",
            self.title, from_row, LAST_COLUMN, to_row
        )
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.api_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    async fn batch_update(&self, request: serde_json::Value) -> Result<(), SheetError> {
        let response = self
            .client
            .post(format!(
                "{}/spreadsheets/{}:batchUpdate",
                self.api_url, self.spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .json(&json!({ "requests": [request] }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Write cells at an exact range, overwriting whatever is there.
    async fn write_row(&self, index: u32, cells: &[String]) -> Result<(), SheetError> {
        let range = self.range(index, index);
        let response = self
            .client
            .put(self.values_url(&range))
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "range": range, "values": [cells] }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Worksheet for HttpWorksheet {
    async fn row(&self, index: u32) -> Result<Option<Vec<String>>, SheetError> {
        let range = self.range(index, index);
        let response = self
            .client
            .get(self.values_url(&range))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let value_range: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetError::Malformed(e.to_string()))?;

        Ok(value_range.values.into_iter().next())
    }

    async fn row_count(&self) -> Result<u32, SheetError> {
        let range = format!("{}!A:{}", self.title, LAST_COLUMN);
        let response = self
            .client
            .get(self.values_url(&range))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let value_range: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetError::Malformed(e.to_string()))?;

        Ok(value_range.values.len() as u32)
    }

    async fn insert_row(&self, index: u32, cells: &[String]) -> Result<(), SheetError> {
        // Two steps: open a gap, then fill it. Row indices in the dimension
        // request are 0-based and end-exclusive.
        self.batch_update(json!({
            "insertDimension": {
                "range": {
                    "sheetId": self.sheet_id,
                    "dimension": "ROWS",
                    "startIndex": index - 1,
                    "endIndex": index
                },
                "inheritFromBefore": false
            }
        }))
        .await?;

        self.write_row(index, cells).await
    }

    async fn append_row(&self, cells: &[String]) -> Result<(), SheetError> {
        let range = self.range(1, 1);
        let response = self
            .client
            .post(format!("{}:append", self.values_url(&range)))
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [cells] }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_row(&self, index: u32) -> Result<(), SheetError> {
        self.batch_update(json!({
            "deleteDimension": {
                "range": {
                    "sheetId": self.sheet_id,
                    "dimension": "ROWS",
                    "startIndex": index - 1,
                    "endIndex": index
                }
            }
        }))
        .await
    }
}
