//! Common test utilities for review-bridge-api integration tests.
//!
//! This module provides:
//! - Recording implementations of the collaborator traits
//! - Router construction with a fully wired dispatch pipeline
//! - Request builders for signed and unsigned webhook deliveries

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use review_bridge_api::{create_router, AppState, ServiceConfig, ServiceMetrics};
use review_bridge_core::signature::sign;
use review_bridge_core::{
    Dispatcher, EventTypeRegistry, ImportError, ImportKind, PullRequestImporter, SessionBinder,
    SessionContext, SessionError, SignatureVerifier,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording importer
// ============================================================================

/// Records import calls and returns a configurable result.
pub struct RecordingImporter {
    calls: Mutex<Vec<ImportCall>>,
    fail: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCall {
    pub organization: String,
    pub repository: String,
    pub pr_number: u32,
}

impl RecordingImporter {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    #[allow(dead_code)]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<ImportCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestImporter for RecordingImporter {
    async fn import_pull_request(
        &self,
        _job_index: usize,
        organization: &str,
        repository: &str,
        pr_number: u32,
        _kind: ImportKind,
    ) -> Result<(), ImportError> {
        self.calls.lock().unwrap().push(ImportCall {
            organization: organization.to_string(),
            repository: repository.to_string(),
            pr_number,
        });
        if self.fail {
            Err(ImportError::Transport {
                message: "review server unreachable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Session binder
// ============================================================================

/// Binds a fixed test user, or fails when constructed unbound.
pub struct TestSessionBinder {
    username: Option<String>,
}

impl TestSessionBinder {
    pub fn bound() -> Arc<Self> {
        Arc::new(Self {
            username: Some("webhook-user".to_string()),
        })
    }

    #[allow(dead_code)]
    pub fn unbound() -> Arc<Self> {
        Arc::new(Self { username: None })
    }
}

#[async_trait]
impl SessionBinder for TestSessionBinder {
    async fn bind(&self) -> Result<SessionContext, SessionError> {
        match &self.username {
            Some(username) => Ok(SessionContext::new(username.clone())),
            None => Err(SessionError::NotConfigured {
                field: "webhook.user".to_string(),
            }),
        }
    }
}

// ============================================================================
// Router construction
// ============================================================================

/// Build a router over a fully wired pipeline.
///
/// The verifier is derived from the config so the secret used for
/// verification and the secret the health endpoint reports cannot drift.
pub fn test_router(
    secret: Option<&str>,
    importer: Arc<RecordingImporter>,
    sessions: Arc<TestSessionBinder>,
) -> axum::Router {
    let mut config = ServiceConfig::default();
    config.webhook.secret = secret.map(str::to_string);
    config.webhook.user = "webhook-user".to_string();

    let registry = Arc::new(EventTypeRegistry::with_builtin_handlers(importer));
    let dispatcher = Arc::new(Dispatcher::new(
        registry,
        SignatureVerifier::new(config.webhook.secret.clone()),
        sessions,
    ));
    let metrics = ServiceMetrics::new().expect("metrics registration");

    create_router(AppState::new(config, dispatcher, metrics))
}

// ============================================================================
// Request builders
// ============================================================================

/// POST an unsigned delivery to the default webhook endpoint.
pub fn webhook_request(event_type: Option<&str>, body: &[u8]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhooks")
        .header("content-type", "application/json");
    if let Some(event_type) = event_type {
        builder = builder.header("x-github-event", event_type);
    }
    builder.body(Body::from(body.to_vec())).unwrap()
}

/// POST a delivery carrying a `sha1=<hex>` signature header.
#[allow(dead_code)]
pub fn signed_webhook_request(event_type: &str, signature: &str, body: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhooks")
        .header("content-type", "application/json")
        .header("x-github-event", event_type)
        .header("x-hub-signature", signature)
        .body(Body::from(body.to_vec()))
        .unwrap()
}

/// Compute the signature token the forge would send for `body`.
#[allow(dead_code)]
pub fn signature_for(secret: &str, body: &[u8]) -> String {
    sign(secret, body)
}
