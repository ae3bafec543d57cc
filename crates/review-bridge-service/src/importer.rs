//! REST-backed pull-request importer.
//!
//! Forwards import requests to the review server's import endpoint. The
//! actual import work (fetching commits from the forge, creating changes)
//! runs on the review-server side; this collaborator only carries the
//! request across.

use async_trait::async_trait;
use review_bridge_api::ImportConfig;
use review_bridge_core::{ImportError, ImportKind, PullRequestImporter};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Path of the import endpoint relative to the review-server base URL.
const IMPORT_PATH: &str = "/a/plugins/github/pulls/import";

/// Body of an import request.
#[derive(Debug, Serialize)]
struct ImportRequest<'a> {
    index: usize,
    organization: &'a str,
    repository: &'a str,
    pr_number: u32,
    import_type: &'a str,
}

/// [`PullRequestImporter`] that POSTs to the review server's REST API.
pub struct RestPullRequestImporter {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl RestPullRequestImporter {
    /// Build an importer from the import configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Transport`] when the HTTP client cannot be
    /// constructed (broken TLS backend or invalid timeout).
    pub fn new(config: &ImportConfig) -> Result<Self, ImportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ImportError::Transport {
                message: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn import_type_name(kind: ImportKind) -> &'static str {
        match kind {
            ImportKind::Commits => "commits",
        }
    }
}

#[async_trait]
impl PullRequestImporter for RestPullRequestImporter {
    #[instrument(skip(self))]
    async fn import_pull_request(
        &self,
        job_index: usize,
        organization: &str,
        repository: &str,
        pr_number: u32,
        kind: ImportKind,
    ) -> Result<(), ImportError> {
        let url = format!("{}{}", self.base_url, IMPORT_PATH);
        let request = ImportRequest {
            index: job_index,
            organization,
            repository,
            pr_number,
            import_type: Self::import_type_name(kind),
        };

        debug!(url = %url, "Forwarding pull request import to the review server");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .await
            .map_err(|e| ImportError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ImportError::Rejected {
                organization: organization.to_string(),
                repository: repository.to_string(),
                pr_number,
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
#[path = "importer_tests.rs"]
mod tests;
