//! Bulk verification API integration tests.
//!
//! Run with: `cargo test -p certguard-api --test bulk_verify_test`

mod helpers;

use std::sync::Arc;

use axum_test::multipart::MultipartForm;
use helpers::{fixtures, setup_test_app, setup_test_app_with, test_config, StaticAnalyzer};

#[tokio::test]
async fn test_bulk_verify_three_files() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/bulk-verify")
        .multipart(fixtures::batch_form(3))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["totalProcessed"], 3);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    // Submission order is preserved in the per-file results.
    for (i, entry) in results.iter().enumerate() {
        assert_eq!(entry["fileName"], format!("cert-{}.pdf", i));
        assert_eq!(entry["processed"], true);
        let confidence = entry["confidence"].as_u64().unwrap();
        assert!((60..=100).contains(&confidence));
    }
}

#[tokio::test]
async fn test_bulk_verify_counts_are_consistent() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/bulk-verify")
        .multipart(fixtures::batch_form(5))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    let total = body["totalProcessed"].as_u64().unwrap();
    let successful = body["successful"].as_u64().unwrap();
    let failed = body["failed"].as_u64().unwrap();

    assert_eq!(total, 5);
    assert_eq!(successful + failed, total);
    assert_eq!(body["results"].as_array().unwrap().len() as u64, total);
}

#[tokio::test]
async fn test_bulk_verify_rejects_eleventh_file() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/bulk-verify")
        .multipart(fixtures::batch_form(11))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "TOO_MANY_FILES");

    // A rejected batch admits nothing.
    assert_eq!(app.artifact_count(), 0);
}

#[tokio::test]
async fn test_bulk_verify_accepts_full_batch() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/bulk-verify")
        .multipart(fixtures::batch_form(10))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["totalProcessed"], 10);
}

#[tokio::test]
async fn test_bulk_verify_empty_form() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("note", "no files");
    let response = app.server.post("/api/bulk-verify").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NO_FILE_PROVIDED");
}

#[tokio::test]
async fn test_bulk_verify_one_bad_file_rejects_whole_batch() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("certificates", fixtures::pdf_part("good-1.pdf"))
        .add_part(
            "certificates",
            axum_test::multipart::Part::bytes(b"#!/bin/sh".to_vec())
                .file_name("script.sh")
                .mime_type("text/x-shellscript"),
        )
        .add_part("certificates", fixtures::pdf_part("good-2.pdf"));
    let response = app.server.post("/api/bulk-verify").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_TYPE");

    // None of the batch was persisted, including the valid files.
    assert_eq!(app.artifact_count(), 0);
}

#[tokio::test]
async fn test_bulk_artifacts_reaped_after_grace() {
    let mut config = test_config();
    config.reap_grace_seconds = 0;
    let app = setup_test_app_with(config, Arc::new(StaticAnalyzer)).await;

    let response = app
        .server
        .post("/api/bulk-verify")
        .multipart(fixtures::batch_form(4))
        .await;
    assert_eq!(response.status_code(), 200);

    assert!(app.wait_for_reap().await, "batch artifacts were never reaped");
}
