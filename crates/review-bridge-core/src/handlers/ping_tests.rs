//! Tests for [`PingHandler`].

use super::*;
use crate::payload::{PingPayload, PullRequestPayload};

fn session() -> SessionContext {
    SessionContext::new("webhook-user")
}

/// A ping payload completes successfully.
#[tokio::test]
async fn test_ping_completes() {
    let handler = PingHandler::new();
    let payload = EventPayload::Ping(PingPayload {
        zen: "Keep it logically awesome.".to_string(),
        hook_id: 42,
    });

    let outcome = handler.handle(&session(), &payload).await.unwrap();
    assert_eq!(outcome, Outcome::Completed);
}

/// A default (all-empty) ping payload is still a valid liveness check.
#[tokio::test]
async fn test_empty_ping_completes() {
    let handler = PingHandler::new();
    let payload = EventPayload::Ping(PingPayload::default());

    let outcome = handler.handle(&session(), &payload).await.unwrap();
    assert_eq!(outcome, Outcome::Completed);
}

/// The declared registration metadata matches the ping event.
#[test]
fn test_declares_ping_event_and_shape() {
    let handler = PingHandler::new();
    assert_eq!(handler.event_type(), EventType::Ping);
    assert_eq!(handler.payload_kind(), PayloadKind::Ping);
}

/// A mismatched payload shape is a registration bug, reported as an error.
#[tokio::test]
async fn test_wrong_payload_shape_is_error() {
    let handler = PingHandler::new();
    let payload = EventPayload::PullRequest(PullRequestPayload::default());

    let result = handler.handle(&session(), &payload).await;
    assert!(matches!(
        result,
        Err(HandlerError::UnexpectedPayload { .. })
    ));
}
