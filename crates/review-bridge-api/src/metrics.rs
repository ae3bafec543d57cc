//! Metrics collection for the webhook intake surface.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Prometheus counters for the dispatch pipeline.
///
/// Uses an instance-scoped [`Registry`] rather than the process-global one
/// so that multiple states (tests, embedded use) never collide on metric
/// registration.
pub struct ServiceMetrics {
    registry: Registry,

    /// Deliveries received, before any validation.
    pub webhooks_received: IntCounter,
    /// Deliveries that reached a handler and completed.
    pub webhooks_dispatched: IntCounter,
    /// Deliveries rejected for a missing or unresolvable event type.
    pub webhooks_unresolved: IntCounter,
    /// Deliveries rejected by signature verification.
    pub webhooks_rejected_signature: IntCounter,
    /// Deliveries rejected for a malformed payload body.
    pub webhooks_rejected_payload: IntCounter,
    /// Deliveries that failed server-side (session bind, handler bug).
    pub webhooks_failed_internal: IntCounter,
}

impl ServiceMetrics {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        let webhooks_received = IntCounter::new(
            "webhooks_received_total",
            "Webhook deliveries received, before validation",
        )?;
        let webhooks_dispatched = IntCounter::new(
            "webhooks_dispatched_total",
            "Webhook deliveries dispatched to a handler",
        )?;
        let webhooks_unresolved = IntCounter::new(
            "webhooks_unresolved_total",
            "Webhook deliveries with no registered handler",
        )?;
        let webhooks_rejected_signature = IntCounter::new(
            "webhooks_rejected_signature_total",
            "Webhook deliveries rejected by signature verification",
        )?;
        let webhooks_rejected_payload = IntCounter::new(
            "webhooks_rejected_payload_total",
            "Webhook deliveries rejected for malformed payloads",
        )?;
        let webhooks_failed_internal = IntCounter::new(
            "webhooks_failed_internal_total",
            "Webhook deliveries that failed server-side",
        )?;

        registry.register(Box::new(webhooks_received.clone()))?;
        registry.register(Box::new(webhooks_dispatched.clone()))?;
        registry.register(Box::new(webhooks_unresolved.clone()))?;
        registry.register(Box::new(webhooks_rejected_signature.clone()))?;
        registry.register(Box::new(webhooks_rejected_payload.clone()))?;
        registry.register(Box::new(webhooks_failed_internal.clone()))?;

        Ok(Arc::new(Self {
            registry,
            webhooks_received,
            webhooks_dispatched,
            webhooks_unresolved,
            webhooks_rejected_signature,
            webhooks_rejected_payload,
            webhooks_failed_internal,
        }))
    }

    /// Render the current metric values in Prometheus text exposition
    /// format.
    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder.encode(&self.registry.gather(), &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
