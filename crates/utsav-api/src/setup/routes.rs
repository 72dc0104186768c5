//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

/// Slack on top of the attachment ceiling for multipart framing and the
/// text fields that travel with the file.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Setup all application routes
pub fn build_router(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state)?;
    let body_limit = state.config.max_upload_bytes() + BODY_LIMIT_SLACK;

    let rapidoc: Router = utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
        .path("/docs")
        .into();

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/v0/districts", get(handlers::districts::list_districts))
        .route(
            "/api/v0/submissions",
            post(handlers::submissions::create_submission),
        )
        .route(
            "/api/v0/submissions/{id}",
            get(handlers::submissions::get_submission),
        )
        .route(
            "/api/v0/submissions/{id}/summaries",
            patch(handlers::submissions::edit_summaries),
        )
        .route(
            "/api/v0/submissions/{id}/archive",
            post(handlers::submissions::save_submission),
        )
        .with_state(state)
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(rapidoc)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(state: &Arc<AppState>) -> Result<CorsLayer, anyhow::Error> {
    let origins = state.config.cors_origins();

    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let parsed: Result<Vec<HeaderValue>, _> = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect();
    let parsed = parsed.map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any))
}
