//! The common capability every event handler implements.

use crate::event::EventType;
use crate::payload::EventPayload;
use crate::session::SessionContext;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// The payload shape a handler declares.
///
/// One tag per modeled shape in [`crate::payload::EventPayload`]. The
/// dispatcher asks the resolved handler for its kind and decodes the raw
/// body through that tag, so handler and payload can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Ping,
    PullRequest,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Ping => f.write_str("ping"),
            PayloadKind::PullRequest => f.write_str("pull_request"),
        }
    }
}

/// What a handler did with a delivery.
///
/// Both variants map to a success response; `Ignored` exists so callers and
/// metrics can tell "acted on" apart from "not interesting".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler performed its action.
    Completed,
    /// The delivery was valid but required no action (e.g. an uninteresting
    /// pull-request action value).
    Ignored,
}

/// Failure inside a handler invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler was invoked with a payload shape other than the one it
    /// declared. Indicates a registration bug, not a client error.
    #[error("handler for '{event_type}' received a {received} payload")]
    UnexpectedPayload {
        event_type: EventType,
        received: PayloadKind,
    },
}

/// A processor for one forge event kind.
///
/// Implementations are stateless (or internally synchronized) because the
/// dispatcher invokes them concurrently from many request tasks.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The event kind this handler is registered under.
    fn event_type(&self) -> EventType;

    /// The payload shape this handler expects.
    fn payload_kind(&self) -> PayloadKind;

    /// Act on a decoded payload within a bound session.
    async fn handle(
        &self,
        session: &SessionContext,
        payload: &EventPayload,
    ) -> Result<Outcome, HandlerError>;
}
