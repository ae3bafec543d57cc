//! Tests for the health and metrics endpoints.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{test_router, webhook_request, RecordingImporter, TestSessionBinder};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// The health endpoint reports status and the registered event kinds.
#[tokio::test]
async fn test_health_reports_registered_events() {
    let app = test_router(
        Some("secret"),
        RecordingImporter::succeeding(),
        TestSessionBinder::bound(),
    );

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let health: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(health["status"], "healthy");
    assert_eq!(health["signature_verification"], true);
    let events: Vec<String> = health["registered_events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(events, vec!["ping", "pull_request"]);
}

/// Without a secret, the health endpoint reports verification disabled and
/// the same pipeline accepts unsigned deliveries, so the reported state
/// matches the enforced one.
#[tokio::test]
async fn test_health_signature_flag_matches_enforcement() {
    let app = test_router(None, RecordingImporter::succeeding(), TestSessionBinder::bound());

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let health: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health["signature_verification"], false);

    let response = app
        .oneshot(webhook_request(Some("ping"), b"{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// The metrics endpoint exposes dispatch counters in text format.
#[tokio::test]
async fn test_metrics_counts_received_deliveries() {
    let app = test_router(None, RecordingImporter::succeeding(), TestSessionBinder::bound());

    let response = app
        .clone()
        .oneshot(webhook_request(Some("ping"), b"{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("webhooks_received_total 1"), "got: {}", text);
    assert!(text.contains("webhooks_dispatched_total 1"), "got: {}", text);
}
