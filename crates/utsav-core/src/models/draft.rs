//! The in-flight submission draft held between generation and save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::record::ArchiveRecord;
use super::state::SubmissionState;
use super::submission::{Attachment, Submission, Summary};
use crate::error::AppError;

/// Everything known about one submission while the user is still reviewing
/// it. Drafts live in the in-process draft store and are pruned after a
/// configured TTL; the durable artifacts are the stored file and the
/// ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDraft {
    pub submission: Submission,
    pub attachment: Option<Attachment>,
    /// Seed summaries produced by generation; kept so an edit can be
    /// compared against what was generated.
    pub seed_summary: Summary,
    /// The summaries that will be persisted; starts equal to the seed.
    pub summary: Summary,
    pub state: SubmissionState,
    /// Soft-failure notes surfaced to the user (remote archival, model
    /// fallback). Never empty strings.
    pub warnings: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionDraft {
    pub fn new(
        submission: Submission,
        attachment: Option<Attachment>,
        summary: Summary,
        warnings: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        SubmissionDraft {
            submission,
            attachment,
            seed_summary: summary.clone(),
            summary,
            state: SubmissionState::Summarized,
            warnings,
            updated_at: now,
        }
    }

    /// Apply user edits to the summaries. Only provided fields change.
    pub fn apply_edit(
        &mut self,
        english: Option<String>,
        telugu: Option<String>,
    ) -> Result<(), AppError> {
        self.state = self.state.advance(SubmissionState::Edited)?;
        if let Some(english) = english {
            self.summary.english = english;
        }
        if let Some(telugu) = telugu {
            self.summary.telugu = telugu;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Mark the draft saved after its ledger row has been appended.
    pub fn mark_saved(&mut self) -> Result<(), AppError> {
        self.state = self.state.advance(SubmissionState::Saved)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Build the ledger row for this draft from its current (possibly
    /// edited) summaries.
    pub fn to_record(&self) -> ArchiveRecord {
        ArchiveRecord {
            timestamp: self.submission.created_at,
            file_name: self
                .attachment
                .as_ref()
                .map(|a| a.stored_name.clone())
                .unwrap_or_default(),
            district: self.submission.district,
            english_summary: self.summary.english.clone(),
            festival_name: self.submission.festival_name.clone(),
            telugu_summary: self.summary.telugu.clone(),
            storage_reference: self
                .attachment
                .as_ref()
                .and_then(|a| a.remote.as_ref())
                .map(|r| r.view_link.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{District, LanguageMode};
    use uuid::Uuid;

    fn draft() -> SubmissionDraft {
        SubmissionDraft::new(
            Submission {
                id: Uuid::new_v4(),
                district: District::Hyderabad,
                festival_name: "Bonalu".to_string(),
                story: String::new(),
                language_mode: LanguageMode::EnTe,
                created_at: Utc::now(),
            },
            None,
            Summary {
                english: "seed english".to_string(),
                telugu: "seed telugu".to_string(),
            },
            vec![],
        )
    }

    #[test]
    fn test_new_draft_is_summarized() {
        let d = draft();
        assert_eq!(d.state, SubmissionState::Summarized);
        assert_eq!(d.summary, d.seed_summary);
    }

    #[test]
    fn test_edit_overrides_only_provided_fields() {
        let mut d = draft();
        d.apply_edit(Some("edited".to_string()), None).unwrap();
        assert_eq!(d.state, SubmissionState::Edited);
        assert_eq!(d.summary.english, "edited");
        assert_eq!(d.summary.telugu, "seed telugu");
        assert_eq!(d.seed_summary.english, "seed english");
    }

    #[test]
    fn test_edit_after_save_is_rejected() {
        let mut d = draft();
        d.mark_saved().unwrap();
        let err = d.apply_edit(Some("late".to_string()), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[test]
    fn test_double_save_is_rejected() {
        let mut d = draft();
        d.mark_saved().unwrap();
        assert!(matches!(d.mark_saved(), Err(AppError::InvalidState(_))));
    }

    #[test]
    fn test_record_uses_edited_summaries() {
        let mut d = draft();
        d.apply_edit(Some("final english".to_string()), Some("final telugu".to_string()))
            .unwrap();
        let record = d.to_record();
        assert_eq!(record.english_summary, "final english");
        assert_eq!(record.telugu_summary, "final telugu");
        assert_eq!(record.file_name, "");
        assert_eq!(record.storage_reference, None);
    }
}
