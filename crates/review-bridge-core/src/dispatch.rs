//! The per-request dispatch pipeline.
//!
//! One dispatch runs per inbound delivery, strictly sequential and terminal
//! at the first failure: resolve the handler from the event-type header,
//! verify the signature over the raw body, decode the body into the shape
//! the handler declared, bind the webhook session, invoke the handler.
//! Exactly one outcome or error is produced per request.

use crate::handler::{HandlerError, Outcome};
use crate::payload::{EventPayload, PayloadError};
use crate::registry::EventTypeRegistry;
use crate::session::{SessionBinder, SessionError};
use crate::signature::SignatureVerifier;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Terminal failure of a dispatch, one variant per rejection class.
///
/// The HTTP layer maps these onto status codes; the mapping lives there so
/// the core stays transport-free.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The event-type header was absent.
    #[error("missing event type header")]
    MissingEventHeader,

    /// No handler is registered for the delivered event type.
    #[error("no handler for event type '{event_type}'")]
    UnresolvedEvent { event_type: String },

    /// The signature header failed verification against the raw body.
    /// Deliberately carries no detail about which sub-check failed.
    #[error("webhook signature verification failed")]
    SignatureInvalid,

    /// The body did not decode into the handler's declared shape.
    #[error(transparent)]
    PayloadMalformed(#[from] PayloadError),

    /// The webhook session could not be established.
    #[error("cannot bind webhook session: {0}")]
    SessionBind(#[from] SessionError),

    /// The handler itself failed.
    #[error("event handler failed: {0}")]
    Handler(#[from] HandlerError),
}

/// Orchestrates webhook dispatch.
///
/// Holds only state that is immutable after startup (registry, verifier)
/// plus the session collaborator, so it is safe to share across concurrent
/// request tasks.
pub struct Dispatcher {
    registry: Arc<EventTypeRegistry>,
    verifier: SignatureVerifier,
    sessions: Arc<dyn SessionBinder>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<EventTypeRegistry>,
        verifier: SignatureVerifier,
        sessions: Arc<dyn SessionBinder>,
    ) -> Self {
        Self {
            registry,
            verifier,
            sessions,
        }
    }

    /// The registry this dispatcher resolves handlers from.
    pub fn registry(&self) -> &EventTypeRegistry {
        &self.registry
    }

    /// Run one delivery through the pipeline.
    ///
    /// # Arguments
    ///
    /// * `event_name` - Value of the event-type header, if present.
    /// * `signature` - Value of the signature header, if present.
    /// * `body` - The raw, unparsed request body. Signature verification
    ///   runs over exactly these bytes.
    ///
    /// # Errors
    ///
    /// Returns the first [`DispatchError`] the pipeline hits; no partial
    /// processing is observable past a failure.
    #[instrument(skip(self, signature, body), fields(body_len = body.len()))]
    pub async fn dispatch(
        &self,
        event_name: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<Outcome, DispatchError> {
        let event_name = event_name.ok_or(DispatchError::MissingEventHeader)?;

        let handler = self.registry.resolve(event_name).ok_or_else(|| {
            debug!(event_type = event_name, "No handler for event type");
            DispatchError::UnresolvedEvent {
                event_type: event_name.to_string(),
            }
        })?;

        if !self.verifier.verify(signature, body) {
            // Security-relevant rejection; log uniformly, leak nothing.
            error!(event_type = event_name, "Signature mismatch to the payload");
            return Err(DispatchError::SignatureInvalid);
        }

        let payload = EventPayload::decode(handler.payload_kind(), body).map_err(|e| {
            error!(event_type = event_name, error = %e, "Invalid webhook payload");
            DispatchError::from(e)
        })?;

        let session = self.sessions.bind().await.map_err(|e| {
            error!(event_type = event_name, error = %e, "Cannot bind webhook session");
            DispatchError::from(e)
        })?;

        let outcome = handler.handle(&session, &payload).await?;
        info!(
            event_type = event_name,
            user = %session.username,
            outcome = ?outcome,
            "Dispatched webhook event"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
