//! HTTP clients for the external summarization and transcription models.
//!
//! Both target an inference-API style endpoint: `POST
//! {base}/models/{model}` with a JSON (summarization) or raw-bytes
//! (transcription) body. Decoding is deterministic; no sampling.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::traits::{SummaryError, Summarizer, Transcriber};

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Bounded output length for summaries, matching the behavior users see
/// in the submission form.
const SUMMARY_MAX_LENGTH: u32 = 150;
const SUMMARY_MIN_LENGTH: u32 = 30;

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Debug, Serialize)]
struct SummarizeParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: String,
}

fn check_status(status: reqwest::StatusCode, body: String) -> Result<String, SummaryError> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(SummaryError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

/// HTTP implementation of [`Summarizer`].
#[derive(Clone)]
pub struct HttpSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpSummarizer {
    pub fn new(
        base_url: String,
        model: String,
        api_key: Option<String>,
    ) -> Result<Self, SummaryError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            model,
            api_key,
        })
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let request = SummarizeRequest {
            inputs: text,
            parameters: SummarizeParameters {
                max_length: SUMMARY_MAX_LENGTH,
                min_length: SUMMARY_MIN_LENGTH,
                do_sample: false,
            },
        };

        let mut builder = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = check_status(status, response.text().await.unwrap_or_default())?;

        let outputs: Vec<SummarizeResponse> = serde_json::from_str(&body)
            .map_err(|e| SummaryError::Malformed(e.to_string()))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or_else(|| SummaryError::Malformed("empty summary output".to_string()))
    }
}

/// HTTP implementation of [`Transcriber`].
#[derive(Clone)]
pub struct HttpTranscriber {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpTranscriber {
    pub fn new(
        base_url: String,
        model: String,
        api_key: Option<String>,
    ) -> Result<Self, SummaryError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            model,
            api_key,
        })
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: &[u8], content_type: &str) -> Result<String, SummaryError> {
        let mut builder = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(audio.to_vec());
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = check_status(status, response.text().await.unwrap_or_default())?;

        let output: TranscribeResponse = serde_json::from_str(&body)
            .map_err(|e| SummaryError::Malformed(e.to_string()))?;

        Ok(output.text)
    }
}
