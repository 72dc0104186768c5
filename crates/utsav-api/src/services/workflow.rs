//! The submission workflow: intake → remote archival → summary generation,
//! then edit and save as separate user-driven steps.
//!
//! Failure domains are deliberately separate: local intake failure aborts
//! the submission; remote archival failure degrades to a warning; summary
//! generation never fails; record append failure fails only the save step
//! (and says so explicitly, since file copies may already exist).

use std::sync::Arc;

use chrono::Utc;
use utsav_archive::{AppendOutcome, RecordLedger, RemoteArchiver};
use utsav_core::models::{
    Attachment, District, RemoteReference, Submission, SubmissionDraft,
};
use utsav_core::validation::{sanitize_filename, StoryValidator};
use utsav_core::AppError;
use utsav_storage::Storage;
use utsav_summary::SummaryService;
use uuid::Uuid;

use super::drafts::DraftStore;
use crate::extract::SubmissionForm;

/// Result of a successful save.
pub struct SavedSubmission {
    pub draft: SubmissionDraft,
    pub outcome: AppendOutcome,
}

/// Remote capabilities, present only when credentials resolved at startup.
pub struct RemoteServices {
    pub archiver: RemoteArchiver,
    pub ledger: RecordLedger,
}

pub struct SubmissionWorkflow {
    storage: Arc<dyn Storage>,
    validator: StoryValidator,
    remote: Option<RemoteServices>,
    summaries: SummaryService,
    drafts: DraftStore,
}

impl SubmissionWorkflow {
    pub fn new(
        storage: Arc<dyn Storage>,
        validator: StoryValidator,
        remote: Option<RemoteServices>,
        summaries: SummaryService,
        drafts: DraftStore,
    ) -> Self {
        Self {
            storage,
            validator,
            remote,
            summaries,
            drafts,
        }
    }

    /// Run intake, best-effort remote archival, and summary generation for
    /// a new submission. Validation happens before any side effect.
    pub async fn submit(&self, form: SubmissionForm) -> Result<SubmissionDraft, AppError> {
        let district = District::from_name(&form.district).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "district must be one of the Telangana districts, got: '{}'",
                form.district
            ))
        })?;

        let festival_name = form.festival_name.trim().to_string();
        if festival_name.is_empty() {
            return Err(AppError::InvalidInput(
                "festival_name is required".to_string(),
            ));
        }

        // Validate the attachment fully before creating any state.
        let prepared = match form.file {
            Some(ref file) => {
                self.validator
                    .validate_all(&file.original_name, &file.content_type, file.data.len())
                    .map_err(AppError::from)?;
                let sanitized = sanitize_filename(&file.original_name).map_err(AppError::from)?;
                Some(sanitized)
            }
            None => None,
        };

        let submission = Submission {
            id: Uuid::new_v4(),
            district,
            festival_name,
            story: form.story.trim().to_string(),
            language_mode: form.language_mode,
            created_at: Utc::now(),
        };

        let mut warnings = Vec::new();

        // Intake: the primary archival path. Failure here is fatal.
        let mut attachment = match (form.file.as_ref(), prepared) {
            (Some(file), Some(sanitized)) => {
                let stored_name = Attachment::stored_name_for(submission.created_at, &sanitized);
                let stored = self
                    .storage
                    .store(district, &stored_name, &file.content_type, file.data.clone())
                    .await
                    .map_err(|e| AppError::LocalStorage(e.to_string()))?;

                Some(Attachment {
                    original_name: sanitized,
                    stored_name,
                    content_type: file.content_type.clone(),
                    size_bytes: stored.size_bytes,
                    local_key: Some(stored.key),
                    local_url: Some(stored.url),
                    remote: None,
                })
            }
            _ => None,
        };

        // Remote archival: best-effort redundancy, independent of intake's
        // success and of the record append later.
        if let (Some(attachment), Some(file)) = (attachment.as_mut(), form.file.as_ref()) {
            match &self.remote {
                Some(remote) => {
                    match remote
                        .archiver
                        .archive(
                            district,
                            &attachment.stored_name,
                            &attachment.content_type,
                            &file.data,
                        )
                        .await
                    {
                        Ok(remote_file) => {
                            attachment.remote = Some(RemoteReference {
                                id: remote_file.id,
                                view_link: remote_file.view_link,
                            });
                        }
                        Err(err) => {
                            tracing::warn!(
                                submission_id = %submission.id,
                                error = %err,
                                "Remote archival failed, continuing without remote reference"
                            );
                            warnings.push(
                                "The file could not be mirrored to the remote archive; the local copy was kept"
                                    .to_string(),
                            );
                        }
                    }
                }
                None => {
                    warnings.push(
                        "Remote archival is not configured; only the local copy was kept"
                            .to_string(),
                    );
                }
            }
        }

        // Summary generation: a seed for the user to edit, never fatal.
        let audio = form.file.as_ref().and_then(|file| {
            file.content_type
                .starts_with("audio/")
                .then(|| (file.data.as_slice(), file.content_type.as_str()))
        });
        let generated = self
            .summaries
            .generate(
                &submission.festival_name,
                district,
                &submission.story,
                audio,
                submission.language_mode,
            )
            .await;
        warnings.extend(generated.warnings);

        let draft = SubmissionDraft::new(submission, attachment, generated.summary, warnings);

        tracing::info!(
            submission_id = %draft.submission.id,
            district = %district,
            festival = %draft.submission.festival_name,
            has_attachment = draft.attachment.is_some(),
            state = draft.state.as_str(),
            "Submission draft created"
        );

        self.drafts.insert(draft.clone());
        Ok(draft)
    }

    pub fn draft(&self, id: Uuid) -> Result<SubmissionDraft, AppError> {
        self.drafts.get(id)
    }

    /// Apply user edits to the seed summaries.
    pub fn edit(
        &self,
        id: Uuid,
        english: Option<String>,
        telugu: Option<String>,
    ) -> Result<SubmissionDraft, AppError> {
        if english.is_none() && telugu.is_none() {
            return Err(AppError::BadRequest(
                "Provide at least one of 'english' or 'telugu'".to_string(),
            ));
        }

        self.drafts.update(id, |draft| {
            draft.apply_edit(english, telugu)?;
            Ok(draft.clone())
        })
    }

    /// Append the draft to the permanent record. On failure the caller is
    /// told explicitly: local/remote file copies may exist even though the
    /// record does not.
    pub async fn save(&self, id: Uuid) -> Result<SavedSubmission, AppError> {
        let remote = self.remote.as_ref().ok_or_else(|| {
            AppError::Credential(
                "Record append is unavailable: archive credentials were not configured"
                    .to_string(),
            )
        })?;

        // Check the transition up front so an already-saved draft does not
        // produce a second ledger row.
        let draft = self.drafts.get(id)?;
        draft.state.advance(utsav_core::models::SubmissionState::Saved)?;

        let record = draft.to_record();
        let outcome = remote.ledger.append(&record).await.map_err(|e| {
            AppError::RecordAppend(format!(
                "The story was not saved to the permanent record (file copies may still exist): {}",
                e
            ))
        })?;

        let draft = self.drafts.update(id, |draft| {
            draft.mark_saved()?;
            Ok(draft.clone())
        })?;

        tracing::info!(
            submission_id = %id,
            row = outcome.row,
            positional = outcome.positional,
            "Submission saved to permanent record"
        );

        Ok(SavedSubmission { draft, outcome })
    }
}
