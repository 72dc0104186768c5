//! Submission and attachment models.
//!
//! Both are transient: they are constructed for one request, carried in a
//! draft between the generate and save steps, and discarded afterwards.
//! The permanent record is the [`ArchiveRecord`](super::record::ArchiveRecord)
//! row appended to the tabular store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::district::District;

/// Which language(s) the generated summary should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum LanguageMode {
    En,
    Te,
    #[default]
    EnTe,
}

impl LanguageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageMode::En => "en",
            LanguageMode::Te => "te",
            LanguageMode::EnTe => "en_te",
        }
    }

    /// Parse a client-submitted mode string. Unknown values are rejected
    /// rather than defaulted so typos surface as errors.
    pub fn parse(value: &str) -> Option<LanguageMode> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Some(LanguageMode::En),
            "te" | "telugu" => Some(LanguageMode::Te),
            "en_te" | "both" => Some(LanguageMode::EnTe),
            _ => None,
        }
    }

    pub fn wants_english(&self) -> bool {
        matches!(self, LanguageMode::En | LanguageMode::EnTe)
    }

    pub fn wants_telugu(&self) -> bool {
        matches!(self, LanguageMode::Te | LanguageMode::EnTe)
    }
}

/// How summaries are produced: fixed templates or an external model.
/// Selected by configuration, never by request content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    Template,
    Model,
}

impl SummaryStrategy {
    pub fn parse(value: &str) -> Option<SummaryStrategy> {
        match value.trim().to_lowercase().as_str() {
            "template" => Some(SummaryStrategy::Template),
            "model" => Some(SummaryStrategy::Model),
            _ => None,
        }
    }
}

/// A generated or edited summary pair. The cell for an unselected language
/// stays empty; English and Telugu are produced independently (the Telugu
/// text is a parallel rendering, not a translation of the English one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub struct Summary {
    pub english: String,
    pub telugu: String,
}

/// Reference to a file mirrored into the remote object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemoteReference {
    /// Object id assigned by the remote store.
    pub id: String,
    /// Human-facing view link; never re-parsed by this system.
    pub view_link: String,
}

/// One uploaded file attached to a submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Attachment {
    /// Sanitized user-supplied name; safe to use as a path component.
    pub original_name: String,
    /// `{timestamp}_{original_name}`; unique at second granularity within a
    /// district as long as original names differ.
    pub stored_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// Set only if local persistence succeeded.
    pub local_key: Option<String>,
    /// Set only if local persistence succeeded.
    pub local_url: Option<String>,
    /// Set only if remote archival succeeded; independent of `local_key`.
    pub remote: Option<RemoteReference>,
}

impl Attachment {
    /// Derive the stored name from an upload time and a sanitized original
    /// name. Second resolution; concurrent uploads of the same name within
    /// one second collide (accepted limitation).
    pub fn stored_name_for(at: DateTime<Utc>, sanitized_name: &str) -> String {
        format!("{}_{}", at.format("%Y%m%d_%H%M%S"), sanitized_name)
    }
}

/// One user-initiated story submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub district: District,
    pub festival_name: String,
    /// User-authored free text; may be empty.
    pub story: String,
    pub language_mode: LanguageMode,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_language_mode_parse() {
        assert_eq!(LanguageMode::parse("en"), Some(LanguageMode::En));
        assert_eq!(LanguageMode::parse("Telugu"), Some(LanguageMode::Te));
        assert_eq!(LanguageMode::parse(" EN_TE "), Some(LanguageMode::EnTe));
        assert_eq!(LanguageMode::parse("fr"), None);
    }

    #[test]
    fn test_language_mode_selection() {
        assert!(LanguageMode::En.wants_english());
        assert!(!LanguageMode::En.wants_telugu());
        assert!(LanguageMode::EnTe.wants_english());
        assert!(LanguageMode::EnTe.wants_telugu());
    }

    #[test]
    fn test_stored_name_format() {
        let at = Utc.with_ymd_and_hms(2026, 7, 14, 9, 30, 5).unwrap();
        assert_eq!(
            Attachment::stored_name_for(at, "bonalu.jpg"),
            "20260714_093005_bonalu.jpg"
        );
    }

    #[test]
    fn test_summary_strategy_parse() {
        assert_eq!(
            SummaryStrategy::parse("template"),
            Some(SummaryStrategy::Template)
        );
        assert_eq!(SummaryStrategy::parse("Model"), Some(SummaryStrategy::Model));
        assert_eq!(SummaryStrategy::parse("llm"), None);
    }
}
