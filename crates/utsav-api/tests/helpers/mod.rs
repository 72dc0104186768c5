//! Shared test helpers: app construction with in-memory backends and
//! multipart request building.
#![allow(dead_code)] // each test binary uses a different subset

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use utsav_api::services::{DraftStore, RemoteServices, SubmissionWorkflow};
use utsav_api::setup::build_router;
use utsav_api::state::AppState;
use utsav_archive::{MemoryObjectStore, MemoryWorksheet, RecordLedger, RemoteArchiver};
use utsav_core::validation::StoryValidator;
use utsav_core::Config;
use utsav_storage::LocalStorage;
use utsav_summary::SummaryService;

pub const BOUNDARY: &str = "utsav-test-boundary";

/// A router wired with in-memory remote backends and a tempdir upload
/// root, plus handles for asserting side effects.
pub struct TestApp {
    pub router: Router,
    pub worksheet: Arc<MemoryWorksheet>,
    pub object_store: Arc<MemoryObjectStore>,
    /// Kept alive so the upload directory survives the test.
    pub upload_dir: TempDir,
}

/// Build the app. `with_remote = false` simulates a deployment without
/// archive credentials (remote archival and record append disabled).
pub async fn build_test_app(with_remote: bool) -> TestApp {
    let upload_dir = TempDir::new().expect("create upload dir");
    let config = Config::for_tests(upload_dir.path().to_str().expect("utf-8 tempdir path"));

    let storage = Arc::new(
        LocalStorage::new(
            upload_dir.path(),
            "http://localhost:8080/uploads".to_string(),
        )
        .await
        .expect("create local storage"),
    );

    let validator = StoryValidator::new(
        config.max_upload_bytes(),
        config.allowed_extensions().to_vec(),
        config.allowed_content_types().to_vec(),
    );

    let worksheet = Arc::new(MemoryWorksheet::new());
    let object_store = Arc::new(MemoryObjectStore::new());

    let remote = with_remote.then(|| RemoteServices {
        archiver: RemoteArchiver::new(
            object_store.clone(),
            "Utsav Uploads".to_string(),
            config.retry_policy(),
        ),
        ledger: RecordLedger::new(worksheet.clone(), config.retry_policy()),
    });

    let workflow = SubmissionWorkflow::new(
        storage,
        validator,
        remote,
        SummaryService::template_only(config.retry_policy()),
        DraftStore::new(config.draft_ttl()),
    );

    let state = AppState::new(config, workflow);
    let router = build_router(state).expect("build router");

    TestApp {
        router,
        worksheet,
        object_store,
        upload_dir,
    }
}

/// One field of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Hand-rolled multipart/form-data body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
                body.extend_from_slice(b"\r\n");
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(
                    format!("Content-Type: {}\r\n\r\n", content_type).as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Build a POST /api/v0/submissions request from multipart parts.
pub fn submission_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v0/submissions")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("build request")
}

/// Build a simple request with an optional JSON body.
pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    }
}

/// Extract a JSON body from a response.
pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

/// A minimal JPEG-looking payload of the requested size.
pub fn jpeg_bytes(size: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.resize(size, 0x42);
    data
}
