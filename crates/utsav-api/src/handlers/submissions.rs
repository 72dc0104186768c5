//! Submission lifecycle handlers: create, fetch, edit summaries, save.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utsav_core::models::{LanguageMode, SubmissionDraft, SubmissionState};
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::parse_submission_form;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct AttachmentResponse {
    pub original_name: String,
    pub stored_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_url: Option<String>,
    /// View link into the remote archive, when mirroring succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_link: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub state: SubmissionState,
    pub district: String,
    pub festival_name: String,
    pub story: String,
    pub language_mode: LanguageMode,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentResponse>,
    pub english_summary: String,
    pub telugu_summary: String,
    /// Soft-failure notes (remote archival, model fallback).
    pub warnings: Vec<String>,
}

impl From<SubmissionDraft> for SubmissionResponse {
    fn from(draft: SubmissionDraft) -> Self {
        SubmissionResponse {
            id: draft.submission.id,
            state: draft.state,
            district: draft.submission.district.as_str().to_string(),
            festival_name: draft.submission.festival_name,
            story: draft.submission.story,
            language_mode: draft.submission.language_mode,
            created_at: draft.submission.created_at,
            attachment: draft.attachment.map(|a| AttachmentResponse {
                original_name: a.original_name,
                stored_name: a.stored_name,
                content_type: a.content_type,
                size_bytes: a.size_bytes,
                local_url: a.local_url,
                remote_link: a.remote.map(|r| r.view_link),
            }),
            english_summary: draft.summary.english,
            telugu_summary: draft.summary.telugu,
            warnings: draft.warnings,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditSummariesRequest {
    /// Replacement English summary; omit to keep the current one.
    pub english: Option<String>,
    /// Replacement Telugu summary; omit to keep the current one.
    pub telugu: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveResponse {
    pub submission: SubmissionResponse,
    /// 1-based ledger row the record was written to (the computed target
    /// when `positional` is false).
    pub row: u32,
    /// False when the unconditional-append fallback was used.
    pub positional: bool,
}

#[utoipa::path(
    post,
    path = "/api/v0/submissions",
    tag = "submissions",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Draft created with seed summaries", body = SubmissionResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Local storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "create_submission"))]
pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SubmissionResponse>, HttpAppError> {
    let form = parse_submission_form(multipart).await?;
    let draft = state.workflow.submit(form).await?;
    Ok(Json(SubmissionResponse::from(draft)))
}

#[utoipa::path(
    get,
    path = "/api/v0/submissions/{id}",
    tag = "submissions",
    params(("id" = Uuid, Path, description = "Submission draft id")),
    responses(
        (status = 200, description = "The submission draft", body = SubmissionResponse),
        (status = 404, description = "Unknown draft", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_submission"))]
pub async fn get_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionResponse>, HttpAppError> {
    let draft = state.workflow.draft(id)?;
    Ok(Json(SubmissionResponse::from(draft)))
}

#[utoipa::path(
    patch,
    path = "/api/v0/submissions/{id}/summaries",
    tag = "submissions",
    params(("id" = Uuid, Path, description = "Submission draft id")),
    request_body = EditSummariesRequest,
    responses(
        (status = 200, description = "Summaries updated", body = SubmissionResponse),
        (status = 404, description = "Unknown draft", body = ErrorResponse),
        (status = 409, description = "Draft already saved", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "edit_summaries"))]
pub async fn edit_summaries(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<EditSummariesRequest>,
) -> Result<Json<SubmissionResponse>, HttpAppError> {
    let draft = state.workflow.edit(id, request.english, request.telugu)?;
    Ok(Json(SubmissionResponse::from(draft)))
}

#[utoipa::path(
    post,
    path = "/api/v0/submissions/{id}/archive",
    tag = "submissions",
    params(("id" = Uuid, Path, description = "Submission draft id")),
    responses(
        (status = 200, description = "Row appended to the permanent record", body = SaveResponse),
        (status = 404, description = "Unknown draft", body = ErrorResponse),
        (status = 409, description = "Draft already saved", body = ErrorResponse),
        (status = 502, description = "Record append failed; file copies may still exist", body = ErrorResponse),
        (status = 503, description = "Archive credentials not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "save_submission"))]
pub async fn save_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveResponse>, HttpAppError> {
    let saved = state.workflow.save(id).await?;
    Ok(Json(SaveResponse {
        row: saved.outcome.row,
        positional: saved.outcome.positional,
        submission: SubmissionResponse::from(saved.draft),
    }))
}
