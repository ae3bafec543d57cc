//! Typed decoding of webhook payload bodies.
//!
//! Forge payloads are large JSON documents; each handler only consumes a
//! small slice of them. The shapes here model exactly the fields the
//! built-in handlers read. serde ignores undeclared fields, and every
//! declared field carries a default, so a body containing only irrelevant
//! fields still decodes — only structurally invalid JSON fails.

use crate::handler::PayloadKind;
use serde::Deserialize;
use thiserror::Error;

/// Decode failure for a webhook payload body.
///
/// Carries the underlying serde diagnostic for server-side logging; the
/// HTTP layer must not echo it back to the caller.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("body is not a valid {kind} payload: {source}")]
    Malformed {
        kind: PayloadKind,
        #[source]
        source: serde_json::Error,
    },
}

/// The decoded payload of a webhook delivery, tagged by shape.
///
/// The dispatcher selects the decode path from the same registry entry that
/// supplied the handler, so a handler is always invoked with the shape it
/// declared.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Ping(PingPayload),
    PullRequest(PullRequestPayload),
}

impl EventPayload {
    /// Decode `body` into the payload shape for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Malformed`] when the body is not valid JSON
    /// for the target shape. Unknown fields never cause failure.
    pub fn decode(kind: PayloadKind, body: &[u8]) -> Result<Self, PayloadError> {
        match kind {
            PayloadKind::Ping => serde_json::from_slice(body)
                .map(EventPayload::Ping)
                .map_err(|source| PayloadError::Malformed { kind, source }),
            PayloadKind::PullRequest => serde_json::from_slice(body)
                .map(EventPayload::PullRequest)
                .map_err(|source| PayloadError::Malformed { kind, source }),
        }
    }

    /// The shape tag of this payload.
    pub fn kind(&self) -> PayloadKind {
        match self {
            EventPayload::Ping(_) => PayloadKind::Ping,
            EventPayload::PullRequest(_) => PayloadKind::PullRequest,
        }
    }
}

/// Fields of the forge's webhook-configuration liveness check.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PingPayload {
    #[serde(default)]
    pub zen: String,
    #[serde(default)]
    pub hook_id: u64,
}

/// The slice of a `pull_request` event the bridge consumes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PullRequestPayload {
    /// What happened to the pull request ("opened", "synchronize", ...).
    #[serde(default)]
    pub action: String,
    /// Pull request number within the repository.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub repository: RepositoryRef,
}

/// Repository coordinates carried by forge payloads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RepositoryRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: OwnerRef,
}

/// Owning account of a repository.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwnerRef {
    #[serde(default)]
    pub login: String,
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
