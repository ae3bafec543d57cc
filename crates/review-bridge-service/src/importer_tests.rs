//! Tests for [`RestPullRequestImporter`] against a mock review server.

use super::*;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ImportConfig {
    ImportConfig {
        base_url: server.uri(),
        username: "bridge".to_string(),
        password: "hunter2".to_string(),
        timeout_seconds: 5,
    }
}

/// A successful import POSTs the expected body to the import endpoint.
#[tokio::test]
async fn test_import_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/a/plugins/github/pulls/import"))
        .and(body_partial_json(serde_json::json!({
            "index": 0,
            "organization": "o",
            "repository": "r",
            "pr_number": 7,
            "import_type": "commits",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let importer = RestPullRequestImporter::new(&config_for(&server)).unwrap();
    let result = importer
        .import_pull_request(0, "o", "r", 7, ImportKind::Commits)
        .await;

    assert!(result.is_ok());
}

/// A non-2xx response surfaces as Rejected with the status code.
#[tokio::test]
async fn test_rejection_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let importer = RestPullRequestImporter::new(&config_for(&server)).unwrap();
    let result = importer
        .import_pull_request(0, "o", "r", 7, ImportKind::Commits)
        .await;

    assert!(matches!(
        result,
        Err(ImportError::Rejected { status: 403, .. })
    ));
}

/// An unreachable review server surfaces as a Transport failure.
#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = ImportConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        username: String::new(),
        password: String::new(),
        timeout_seconds: 1,
    };

    let importer = RestPullRequestImporter::new(&config).unwrap();
    let result = importer
        .import_pull_request(0, "o", "r", 7, ImportKind::Commits)
        .await;

    assert!(matches!(result, Err(ImportError::Transport { .. })));
}

/// Trailing slashes on the base URL do not double up in the request path.
#[tokio::test]
async fn test_base_url_trailing_slash_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/a/plugins/github/pulls/import"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.base_url = format!("{}/", server.uri());

    let importer = RestPullRequestImporter::new(&config).unwrap();
    let result = importer
        .import_pull_request(0, "o", "r", 7, ImportKind::Commits)
        .await;

    assert!(result.is_ok());
}
