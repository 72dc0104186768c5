//! Summary generation service: strategy selection, transcription, and the
//! template fallback.

use std::sync::Arc;

use utsav_core::models::{District, LanguageMode, Summary, SummaryStrategy};
use utsav_core::RetryPolicy;

use crate::template;
use crate::traits::{Summarizer, Transcriber};

/// A generated summary pair plus any soft-failure notes.
#[derive(Debug, Clone)]
pub struct GeneratedSummary {
    pub summary: Summary,
    pub warnings: Vec<String>,
}

/// Produces the seed summaries for a submission.
///
/// The strategy is fixed by configuration. In model mode the English
/// summary comes from the external summarizer over the story text (plus a
/// transcript for audio attachments); the Telugu summary is always the
/// parallel template. Any model or transcription failure degrades to the
/// template output with a warning; generation never fails a submission.
pub struct SummaryService {
    strategy: SummaryStrategy,
    summarizer: Option<Arc<dyn Summarizer>>,
    transcriber: Option<Arc<dyn Transcriber>>,
    retry: RetryPolicy,
}

impl SummaryService {
    pub fn new(
        strategy: SummaryStrategy,
        summarizer: Option<Arc<dyn Summarizer>>,
        transcriber: Option<Arc<dyn Transcriber>>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            strategy,
            summarizer,
            transcriber,
            retry,
        }
    }

    /// Template-only service; used when the model strategy is disabled.
    pub fn template_only(retry: RetryPolicy) -> Self {
        Self::new(SummaryStrategy::Template, None, None, retry)
    }

    /// Generate seed summaries for one submission. `audio` carries the
    /// attachment bytes and content type when the attachment is audio.
    pub async fn generate(
        &self,
        festival_name: &str,
        district: District,
        story: &str,
        audio: Option<(&[u8], &str)>,
        mode: LanguageMode,
    ) -> GeneratedSummary {
        let mut warnings = Vec::new();

        let english = if mode.wants_english() {
            self.english_summary(festival_name, district, story, audio, &mut warnings)
                .await
        } else {
            String::new()
        };

        // The Telugu text is always the parallel template; there is no
        // Telugu model path.
        let telugu = if mode.wants_telugu() {
            template::telugu_summary(festival_name, district)
        } else {
            String::new()
        };

        GeneratedSummary {
            summary: Summary { english, telugu },
            warnings,
        }
    }

    async fn english_summary(
        &self,
        festival_name: &str,
        district: District,
        story: &str,
        audio: Option<(&[u8], &str)>,
        warnings: &mut Vec<String>,
    ) -> String {
        let summarizer = match (self.strategy, &self.summarizer) {
            (SummaryStrategy::Model, Some(summarizer)) => summarizer,
            _ => return template::english_summary(festival_name, district),
        };

        let mut input = story.trim().to_string();

        if let Some((bytes, content_type)) = audio {
            match self.transcribe(bytes, content_type).await {
                Some(transcript) if !transcript.trim().is_empty() => {
                    if !input.is_empty() {
                        input.push('\n');
                    }
                    input.push_str(transcript.trim());
                }
                Some(_) => {}
                None => warnings.push(
                    "Audio transcription failed; the summary covers the written story only"
                        .to_string(),
                ),
            }
        }

        if input.is_empty() {
            // Nothing to summarize; the template is the only sensible seed.
            return template::english_summary(festival_name, district);
        }

        match self
            .retry
            .run("summarizer.summarize", || summarizer.summarize(&input))
            .await
        {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Model summarization failed, falling back to template"
                );
                warnings.push(
                    "Model summarization failed; a template summary was used instead".to_string(),
                );
                template::english_summary(festival_name, district)
            }
        }
    }

    async fn transcribe(&self, bytes: &[u8], content_type: &str) -> Option<String> {
        let transcriber = self.transcriber.as_ref()?;
        match self
            .retry
            .run("transcriber.transcribe", || {
                transcriber.transcribe(bytes, content_type)
            })
            .await
        {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(error = %err, "Audio transcription failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SummaryError, Summarizer, Transcriber};
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedSummarizer(&'static str);

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
            Err(SummaryError::Api {
                status: 503,
                message: "model loading".to_string(),
            })
        }
    }

    struct FixedTranscriber(&'static str);

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(
            &self,
            _audio: &[u8],
            _content_type: &str,
        ) -> Result<String, SummaryError> {
            Ok(self.0.to_string())
        }
    }

    /// Summarizer that echoes its input, for asserting what it was fed.
    struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
            Ok(format!("SUMMARY[{}]", text))
        }
    }

    fn retry() -> RetryPolicy {
        RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(2))
    }

    #[tokio::test]
    async fn test_template_mode_ignores_story_text() {
        let service = SummaryService::template_only(retry());
        let with_story = service
            .generate("Bonalu", District::Hyderabad, "a long story", None, LanguageMode::EnTe)
            .await;
        let without_story = service
            .generate("Bonalu", District::Hyderabad, "", None, LanguageMode::EnTe)
            .await;
        assert_eq!(with_story.summary, without_story.summary);
        assert!(with_story.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_template_mode_scenario_substring() {
        let service = SummaryService::template_only(retry());
        let generated = service
            .generate("Bonalu", District::Hyderabad, "", None, LanguageMode::EnTe)
            .await;
        assert!(generated
            .summary
            .english
            .contains("Bonalu is a traditional festival celebrated in Hyderabad district"));
        assert!(!generated.summary.telugu.is_empty());
    }

    #[tokio::test]
    async fn test_language_mode_en_leaves_telugu_empty() {
        let service = SummaryService::template_only(retry());
        let generated = service
            .generate("Bonalu", District::Hyderabad, "", None, LanguageMode::En)
            .await;
        assert!(!generated.summary.english.is_empty());
        assert!(generated.summary.telugu.is_empty());
    }

    #[tokio::test]
    async fn test_language_mode_te_leaves_english_empty() {
        let service = SummaryService::template_only(retry());
        let generated = service
            .generate("Bonalu", District::Hyderabad, "", None, LanguageMode::Te)
            .await;
        assert!(generated.summary.english.is_empty());
        assert!(!generated.summary.telugu.is_empty());
    }

    #[tokio::test]
    async fn test_model_mode_uses_summarizer() {
        let service = SummaryService::new(
            SummaryStrategy::Model,
            Some(Arc::new(FixedSummarizer("model output"))),
            None,
            retry(),
        );
        let generated = service
            .generate("Bonalu", District::Hyderabad, "a story", None, LanguageMode::EnTe)
            .await;
        assert_eq!(generated.summary.english, "model output");
        // Telugu stays the parallel template even in model mode
        assert!(generated.summary.telugu.contains("Bonalu"));
    }

    #[tokio::test]
    async fn test_model_failure_falls_back_to_template() {
        let service = SummaryService::new(
            SummaryStrategy::Model,
            Some(Arc::new(FailingSummarizer)),
            None,
            retry(),
        );
        let generated = service
            .generate("Bonalu", District::Hyderabad, "a story", None, LanguageMode::En)
            .await;
        assert!(generated
            .summary
            .english
            .contains("Bonalu is a traditional festival celebrated in Hyderabad district"));
        assert_eq!(generated.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_model_mode_empty_input_uses_template() {
        let service = SummaryService::new(
            SummaryStrategy::Model,
            Some(Arc::new(FailingSummarizer)),
            None,
            retry(),
        );
        let generated = service
            .generate("Bonalu", District::Hyderabad, "  ", None, LanguageMode::En)
            .await;
        // Empty input short-circuits to the template without touching the
        // model, so no warning is recorded.
        assert!(generated.warnings.is_empty());
        assert!(generated.summary.english.contains("Bonalu"));
    }

    #[tokio::test]
    async fn test_transcript_joins_model_input() {
        let service = SummaryService::new(
            SummaryStrategy::Model,
            Some(Arc::new(EchoSummarizer)),
            Some(Arc::new(FixedTranscriber("spoken words"))),
            retry(),
        );
        let generated = service
            .generate(
                "Bonalu",
                District::Hyderabad,
                "written story",
                Some((b"audio-bytes", "audio/mpeg")),
                LanguageMode::En,
            )
            .await;
        assert_eq!(
            generated.summary.english,
            "SUMMARY[written story\nspoken words]"
        );
    }
}
