//! Summary generation for the Utsav story archive.
//!
//! Two strategies, selected by configuration: fixed five-sentence templates
//! per language, or an external summarization model over the submission's
//! free text (with audio attachments transcribed into the input first).
//! Model failures always fall back to the templates; generation is never
//! fatal to a submission.

pub mod http;
pub mod service;
pub mod template;
pub mod traits;

pub use http::{HttpSummarizer, HttpTranscriber};
pub use service::{GeneratedSummary, SummaryService};
pub use traits::{SummaryError, Summarizer, Transcriber};
