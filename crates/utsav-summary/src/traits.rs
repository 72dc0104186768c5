//! External language-capability traits.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarization service rejected the request: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed summarization response: {0}")]
    Malformed(String),

    #[error("Summarization input is empty")]
    EmptyInput,
}

/// Text summarization capability. Output length is bounded and decoding is
/// deterministic; two calls with the same input produce the same output.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError>;
}

/// Speech-to-text capability for audio attachments.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8], content_type: &str) -> Result<String, SummaryError>;
}
