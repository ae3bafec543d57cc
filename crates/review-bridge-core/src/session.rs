//! Session binding collaborator seam.
//!
//! Handlers act against the review server on behalf of a configured webhook
//! user. Binding that identity (and whatever credential refresh it implies)
//! belongs to the deployment; the core only requires that a valid session
//! context exists before a handler runs, and threads it through the
//! invocation explicitly instead of mutating ambient request state.

use async_trait::async_trait;
use thiserror::Error;

/// The caller identity a handler runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Username of the configured webhook user on the review server.
    pub username: String,
}

impl SessionContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Failure to establish a session for the webhook user.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No webhook user is configured.
    #[error("webhook user is not configured: {field}")]
    NotConfigured { field: String },

    /// The configured user exists but could not be authenticated.
    #[error("cannot authenticate webhook user '{username}'")]
    AuthenticationFailed { username: String },
}

/// Produces a bound session context for dispatch.
#[async_trait]
pub trait SessionBinder: Send + Sync {
    /// Establish the session the next handler invocation runs under.
    async fn bind(&self) -> Result<SessionContext, SessionError>;
}
