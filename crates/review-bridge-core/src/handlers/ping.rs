//! Handler for the forge's `ping` liveness event.

use crate::event::EventType;
use crate::handler::{EventHandler, HandlerError, Outcome, PayloadKind};
use crate::payload::EventPayload;
use crate::session::SessionContext;
use async_trait::async_trait;
use tracing::info;

/// Handles the `ping` event the forge sends to confirm webhook
/// configuration.
///
/// Always registered, so a freshly configured webhook gets a success
/// response even before any other handler exists.
#[derive(Debug, Default)]
pub struct PingHandler;

impl PingHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for PingHandler {
    fn event_type(&self) -> EventType {
        EventType::Ping
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Ping
    }

    async fn handle(
        &self,
        _session: &SessionContext,
        payload: &EventPayload,
    ) -> Result<Outcome, HandlerError> {
        let ping = match payload {
            EventPayload::Ping(ping) => ping,
            other => {
                return Err(HandlerError::UnexpectedPayload {
                    event_type: self.event_type(),
                    received: other.kind(),
                })
            }
        };

        info!(zen = %ping.zen, hook_id = ping.hook_id, "Received webhook ping");
        Ok(Outcome::Completed)
    }
}

#[cfg(test)]
#[path = "ping_tests.rs"]
mod tests;
