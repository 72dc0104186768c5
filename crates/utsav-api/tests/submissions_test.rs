//! End-to-end submission workflow tests against the router, with in-memory
//! remote backends and a tempdir upload root.

mod helpers;

use axum::http::StatusCode;
use helpers::{
    build_test_app, jpeg_bytes, json_request, submission_request, response_json, Part,
};
use serde_json::json;
use tower::util::ServiceExt;

fn scenario_a_parts(data: &[u8]) -> Vec<Part<'_>> {
    vec![
        Part::Text("district", "Hyderabad"),
        Part::Text("festival_name", "Bonalu"),
        Part::Text("story", ""),
        Part::Text("language_mode", "en_te"),
        Part::File {
            name: "file",
            filename: "bonalu photo.jpg",
            content_type: "image/jpeg",
            data,
        },
    ]
}

#[tokio::test]
async fn test_full_submission_flow() {
    let app = build_test_app(true).await;
    let data = jpeg_bytes(10 * 1024);

    // Create: intake + remote mirror + seed summaries
    let response = app
        .router
        .clone()
        .oneshot(submission_request(&scenario_a_parts(&data)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["state"], "summarized");
    assert_eq!(body["district"], "Hyderabad");
    assert!(body["english_summary"]
        .as_str()
        .unwrap()
        .contains("Bonalu is a traditional festival celebrated in Hyderabad district"));
    assert!(!body["telugu_summary"].as_str().unwrap().is_empty());
    assert!(body["warnings"].as_array().unwrap().is_empty());

    // Exactly one file under the district's subdirectory
    let district_dir = app.upload_dir.path().join("Hyderabad");
    let entries: Vec<_> = std::fs::read_dir(&district_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let stored_name = body["attachment"]["stored_name"].as_str().unwrap();
    assert!(district_dir.join(stored_name).is_file());

    // Mirrored remotely with a view link
    assert!(body["attachment"]["remote_link"]
        .as_str()
        .unwrap()
        .starts_with("https://"));
    assert_eq!(app.object_store.file_count().await, 1);

    // Save: one header row plus one data row with the summaries in the
    // designated columns
    let id = body["id"].as_str().unwrap();
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v0/submissions/{}/archive", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let saved = response_json(response).await;
    assert_eq!(saved["submission"]["state"], "saved");
    assert_eq!(saved["row"], 2);
    assert_eq!(saved["positional"], true);

    let rows = app.worksheet.all_rows().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "timestamp");
    assert_eq!(rows[1][1], stored_name);
    assert_eq!(rows[1][2], "Hyderabad");
    assert!(rows[1][3].contains("Bonalu is a traditional festival"));
    assert_eq!(rows[1][4], "Bonalu");
    assert!(!rows[1][5].is_empty());
    assert!(rows[1][6].starts_with("https://"));
}

#[tokio::test]
async fn test_empty_district_is_rejected_with_no_side_effects() {
    let app = build_test_app(true).await;
    let data = jpeg_bytes(1024);
    let parts = vec![
        Part::Text("district", ""),
        Part::Text("festival_name", "Bonalu"),
        Part::File {
            name: "file",
            filename: "photo.jpg",
            content_type: "image/jpeg",
            data: &data,
        },
    ];

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&parts))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["code"], "INVALID_INPUT");

    // No file, no remote object, no ledger row
    let entries: Vec<_> = std::fs::read_dir(app.upload_dir.path()).unwrap().collect();
    assert!(entries.is_empty());
    assert_eq!(app.object_store.file_count().await, 0);
    assert!(app.worksheet.all_rows().await.is_empty());
}

#[tokio::test]
async fn test_unknown_district_is_rejected() {
    let app = build_test_app(true).await;
    let parts = vec![
        Part::Text("district", "Mumbai"),
        Part::Text("festival_name", "Bonalu"),
    ];

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&parts))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_attachment_is_rejected_before_storage() {
    let app = build_test_app(true).await;
    // One byte over the 16 MiB ceiling
    let data = jpeg_bytes(16 * 1024 * 1024 + 1);

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&scenario_a_parts(&data)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let entries: Vec<_> = std::fs::read_dir(app.upload_dir.path()).unwrap().collect();
    assert!(entries.is_empty());
    assert_eq!(app.object_store.file_count().await, 0);
}

#[tokio::test]
async fn test_disallowed_extension_is_rejected() {
    let app = build_test_app(true).await;
    let parts = vec![
        Part::Text("district", "Hyderabad"),
        Part::Text("festival_name", "Bonalu"),
        Part::File {
            name: "file",
            filename: "malware.exe",
            content_type: "application/octet-stream",
            data: b"MZ",
        },
    ];

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&parts))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_content_type_extension_mismatch_is_rejected() {
    let app = build_test_app(true).await;
    let parts = vec![
        Part::Text("district", "Hyderabad"),
        Part::Text("festival_name", "Bonalu"),
        Part::File {
            name: "file",
            filename: "photo.jpg",
            content_type: "video/mp4",
            data: b"not a jpeg",
        },
    ];

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&parts))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_story_only_submission_is_accepted() {
    let app = build_test_app(true).await;
    let parts = vec![
        Part::Text("district", "Warangal"),
        Part::Text("festival_name", "Bathukamma"),
        Part::Text("story", "Flowers are arranged in concentric layers."),
        Part::Text("language_mode", "en"),
    ];

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&parts))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["attachment"].is_null());
    assert!(body["telugu_summary"].as_str().unwrap().is_empty());

    // Saving records an empty file name and no storage reference
    let id = body["id"].as_str().unwrap();
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v0/submissions/{}/archive", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rows = app.worksheet.all_rows().await;
    assert_eq!(rows[1][1], "");
    assert_eq!(rows[1][6], "");
}

#[tokio::test]
async fn test_edit_then_save_uses_edited_summaries() {
    let app = build_test_app(true).await;
    let data = jpeg_bytes(1024);

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&scenario_a_parts(&data)))
        .await
        .unwrap();
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v0/submissions/{}/summaries", id),
            Some(json!({"english": "My own words about Bonalu."})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let edited = response_json(response).await;
    assert_eq!(edited["state"], "edited");
    assert_eq!(edited["english_summary"], "My own words about Bonalu.");
    // The Telugu seed survives an English-only edit
    assert!(!edited["telugu_summary"].as_str().unwrap().is_empty());

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v0/submissions/{}/archive", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rows = app.worksheet.all_rows().await;
    assert_eq!(rows[1][3], "My own words about Bonalu.");
}

#[tokio::test]
async fn test_edit_without_fields_is_rejected() {
    let app = build_test_app(true).await;
    let response = app
        .router
        .clone()
        .oneshot(submission_request(&[
            Part::Text("district", "Hyderabad"),
            Part::Text("festival_name", "Bonalu"),
        ]))
        .await
        .unwrap();
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v0/submissions/{}/summaries", id),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_double_save_is_a_conflict() {
    let app = build_test_app(true).await;
    let response = app
        .router
        .clone()
        .oneshot(submission_request(&[
            Part::Text("district", "Hyderabad"),
            Part::Text("festival_name", "Bonalu"),
        ]))
        .await
        .unwrap();
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();
    let save_uri = format!("/api/v0/submissions/{}/archive", id);

    let first = app
        .router
        .clone()
        .oneshot(json_request("POST", &save_uri, None))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .router
        .clone()
        .oneshot(json_request("POST", &save_uri, None))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Exactly one data row was written
    assert_eq!(app.worksheet.all_rows().await.len(), 2);
}

#[tokio::test]
async fn test_header_written_once_across_submissions() {
    let app = build_test_app(true).await;

    for festival in ["Bonalu", "Bathukamma"] {
        let response = app
            .router
            .clone()
            .oneshot(submission_request(&[
                Part::Text("district", "Hyderabad"),
                Part::Text("festival_name", festival),
            ]))
            .await
            .unwrap();
        let body = response_json(response).await;
        let id = body["id"].as_str().unwrap().to_string();
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v0/submissions/{}/archive", id),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let rows = app.worksheet.all_rows().await;
    assert_eq!(rows.len(), 3);
    let header_rows = rows.iter().filter(|row| row[0] == "timestamp").count();
    assert_eq!(header_rows, 1);
}

#[tokio::test]
async fn test_remote_failure_does_not_block_save() {
    let app = build_test_app(true).await;
    app.object_store.fail_uploads(true);
    let data = jpeg_bytes(1024);

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&scenario_a_parts(&data)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["attachment"]["remote_link"].is_null());
    assert!(!body["warnings"].as_array().unwrap().is_empty());

    // The local copy exists and record append still succeeds
    let id = body["id"].as_str().unwrap();
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v0/submissions/{}/archive", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rows = app.worksheet.all_rows().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][6], "");
}

#[tokio::test]
async fn test_save_without_credentials_is_unavailable() {
    let app = build_test_app(false).await;

    let response = app
        .router
        .clone()
        .oneshot(submission_request(&[
            Part::Text("district", "Hyderabad"),
            Part::Text("festival_name", "Bonalu"),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v0/submissions/{}/archive", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = response_json(response).await;
    assert_eq!(json["code"], "CREDENTIAL_ERROR");
}

#[tokio::test]
async fn test_get_unknown_submission_is_not_found() {
    let app = build_test_app(true).await;
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/v0/submissions/{}", uuid::Uuid::new_v4()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_file_field_without_festival_is_rejected() {
    let app = build_test_app(true).await;
    let response = app
        .router
        .clone()
        .oneshot(submission_request(&[Part::Text("district", "Hyderabad")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
