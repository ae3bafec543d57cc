//! Session binder for the configured webhook user.

use async_trait::async_trait;
use review_bridge_core::{SessionBinder, SessionContext, SessionError};

/// Binds every dispatch to the statically configured webhook user.
///
/// The review server trusts this service's import calls via HTTP
/// credentials; the session context only carries the identity handlers act
/// under. An unset `webhook.user` fails every bind, which the HTTP layer
/// reports as a server-side error — the operator must fix the
/// configuration.
#[derive(Debug, Clone)]
pub struct StaticSessionBinder {
    username: String,
}

impl StaticSessionBinder {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

#[async_trait]
impl SessionBinder for StaticSessionBinder {
    async fn bind(&self) -> Result<SessionContext, SessionError> {
        if self.username.is_empty() {
            return Err(SessionError::NotConfigured {
                field: "webhook.user".to_string(),
            });
        }
        Ok(SessionContext::new(self.username.clone()))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
