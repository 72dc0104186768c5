//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Utsav API",
        version = "0.1.0",
        description = "Community festival story archive for Telangana. Users submit a story \
            about a local festival with an optional media file; the service stores the file \
            per district, mirrors it to a remote archive, seeds editable English/Telugu \
            summaries, and appends one row per saved submission to the permanent record. \
            All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::health::health,
        handlers::districts::list_districts,
        handlers::submissions::create_submission,
        handlers::submissions::get_submission,
        handlers::submissions::edit_summaries,
        handlers::submissions::save_submission,
    ),
    components(schemas(
        utsav_core::models::SubmissionState,
        utsav_core::models::LanguageMode,
        error::ErrorResponse,
        handlers::health::HealthResponse,
        handlers::districts::DistrictsResponse,
        handlers::submissions::AttachmentResponse,
        handlers::submissions::SubmissionResponse,
        handlers::submissions::EditSummariesRequest,
        handlers::submissions::SaveResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "districts", description = "District enumeration"),
        (name = "submissions", description = "Story submission lifecycle"),
    )
)]
pub struct ApiDoc;
