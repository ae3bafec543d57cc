//! The event-type → handler registry.

use crate::event::EventType;
use crate::handler::EventHandler;
use crate::handlers::{PingHandler, PullRequestHandler};
use crate::import::PullRequestImporter;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Maps forge event kinds to their handlers.
///
/// Built once at startup from an explicit registration list and immutable
/// afterwards; dispatches on every request thread share it through an `Arc`
/// without locking. A kind with no registration is a legitimate state — most
/// catalog entries have no handler — and resolves to `None`.
#[derive(Default)]
pub struct EventTypeRegistry {
    handlers: HashMap<EventType, Arc<dyn EventHandler>>,
}

impl EventTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in handlers.
    ///
    /// `ping` is always registered as the liveness check; `pull_request` is
    /// wired to the given import collaborator.
    pub fn with_builtin_handlers(importer: Arc<dyn PullRequestImporter>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PingHandler::new()));
        registry.register(Arc::new(PullRequestHandler::new(importer)));
        registry
    }

    /// Register a handler under its declared event type.
    ///
    /// Exactly one handler may own an event type; a second registration for
    /// the same type replaces the first and logs a `WARN`.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        let event_type = handler.event_type();
        if self.handlers.insert(event_type, handler).is_some() {
            warn!(%event_type, "Replacing previously registered webhook handler");
        } else {
            info!(%event_type, "Registered webhook handler");
        }
    }

    /// Resolve the handler for a wire event name.
    ///
    /// Matching is exact and case-insensitive. Unknown names and known kinds
    /// without a handler both yield `None`.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn EventHandler>> {
        let event_type = EventType::from_name(name)?;
        self.handlers.get(&event_type).cloned()
    }

    /// Whether a handler is registered for `event_type`.
    pub fn contains(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// The registered event kinds, in unspecified order.
    pub fn registered_types(&self) -> Vec<EventType> {
        self.handlers.keys().copied().collect()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for EventTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.handlers.keys().map(|t| t.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("EventTypeRegistry")
            .field("registered", &types)
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
