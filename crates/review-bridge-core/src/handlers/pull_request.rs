//! Handler for `pull_request` events.

use crate::event::EventType;
use crate::handler::{EventHandler, HandlerError, Outcome, PayloadKind};
use crate::import::{ImportKind, PullRequestImporter};
use crate::payload::EventPayload;
use crate::session::SessionContext;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Imports a pull request into the review server when the forge reports it
/// as newly opened or re-pushed.
///
/// Actions other than `opened` and `synchronize` (closed, labeled,
/// assigned, ...) are ignored.
///
/// Import failures are absorbed: they are logged at error level and the
/// delivery still reports success. The forge retries non-2xx deliveries,
/// and a retry would not fix a business failure on the review-server side —
/// it would only re-trigger the same broken import.
pub struct PullRequestHandler {
    importer: Arc<dyn PullRequestImporter>,
}

impl PullRequestHandler {
    pub fn new(importer: Arc<dyn PullRequestImporter>) -> Self {
        Self { importer }
    }
}

#[async_trait]
impl EventHandler for PullRequestHandler {
    fn event_type(&self) -> EventType {
        EventType::PullRequest
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::PullRequest
    }

    async fn handle(
        &self,
        _session: &SessionContext,
        payload: &EventPayload,
    ) -> Result<Outcome, HandlerError> {
        let event = match payload {
            EventPayload::PullRequest(event) => event,
            other => {
                return Err(HandlerError::UnexpectedPayload {
                    event_type: self.event_type(),
                    received: other.kind(),
                })
            }
        };

        if event.action != "opened" && event.action != "synchronize" {
            info!(
                action = %event.action,
                number = event.number,
                "Ignoring pull_request action"
            );
            return Ok(Outcome::Ignored);
        }

        let organization = event.repository.owner.login.as_str();
        let repository = event.repository.name.as_str();

        info!(
            organization, repository, number = event.number,
            "Importing pull request"
        );
        match self
            .importer
            .import_pull_request(0, organization, repository, event.number, ImportKind::Commits)
            .await
        {
            Ok(()) => {
                info!(
                    organization, repository, number = event.number,
                    "Imported pull request"
                );
            }
            Err(import_error) => {
                error!(
                    organization, repository, number = event.number,
                    error = %import_error,
                    "Pull request import failed"
                );
            }
        }

        Ok(Outcome::Completed)
    }
}

#[cfg(test)]
#[path = "pull_request_tests.rs"]
mod tests;
