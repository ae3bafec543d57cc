//! Tests for the dispatch-error → HTTP status mapping.

use super::*;
use review_bridge_core::payload::PayloadError;
use review_bridge_core::{EventPayload, PayloadKind, SessionError};

fn payload_error() -> PayloadError {
    EventPayload::decode(PayloadKind::Ping, b"not json").unwrap_err()
}

/// Missing and unresolvable event headers both map to 404.
#[test]
fn test_unresolved_maps_to_404() {
    let missing = WebhookHandlerError::from(DispatchError::MissingEventHeader);
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let unresolved = WebhookHandlerError::from(DispatchError::UnresolvedEvent {
        event_type: "unknown_event".to_string(),
    });
    assert_eq!(unresolved.status_code(), StatusCode::NOT_FOUND);
}

/// Signature and payload rejections both map to 400.
#[test]
fn test_client_rejections_map_to_400() {
    let signature = WebhookHandlerError::from(DispatchError::SignatureInvalid);
    assert_eq!(signature.status_code(), StatusCode::BAD_REQUEST);

    let payload = WebhookHandlerError::from(DispatchError::PayloadMalformed(payload_error()));
    assert_eq!(payload.status_code(), StatusCode::BAD_REQUEST);
}

/// Session binding failures are server-side: 500.
#[test]
fn test_session_bind_maps_to_500() {
    let error = WebhookHandlerError::from(DispatchError::SessionBind(
        SessionError::NotConfigured {
            field: "webhook.user".to_string(),
        },
    ));
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// The client body for a payload rejection carries no parse diagnostics.
#[test]
fn test_payload_rejection_body_is_sanitized() {
    let error = WebhookHandlerError::from(DispatchError::PayloadMalformed(payload_error()));
    let message = error.client_message();

    assert_eq!(message, "malformed payload");
    assert!(!message.contains("expected"), "serde detail must not leak");
}
