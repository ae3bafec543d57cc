//! Pull-request import collaborator seam.
//!
//! Importing a pull request into the review server (fetching its commits,
//! creating changes, wiring reviewers) is owned by the deployment, not by
//! this crate. The dispatcher only needs the contract below.

use async_trait::async_trait;
use thiserror::Error;

/// How a pull request is materialized on the review-server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Each commit of the pull request becomes an individual change.
    Commits,
}

/// Failure reported by the import collaborator.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The review server refused the import request.
    #[error("review server rejected import of {organization}/{repository}#{pr_number}: HTTP {status}")]
    Rejected {
        organization: String,
        repository: String,
        pr_number: u32,
        status: u16,
    },

    /// The review server could not be reached.
    #[error("transport failure talking to the review server: {message}")]
    Transport { message: String },
}

/// Imports forge pull requests into the review server.
#[async_trait]
pub trait PullRequestImporter: Send + Sync {
    /// Import one pull request.
    ///
    /// # Arguments
    ///
    /// * `job_index` - Position within a batch import; webhook-triggered
    ///   imports always pass 0.
    /// * `organization` - Owning account of the repository on the forge.
    /// * `repository` - Repository name (without the owner prefix).
    /// * `pr_number` - Pull request number within the repository.
    /// * `kind` - How the pull request is materialized as changes.
    async fn import_pull_request(
        &self,
        job_index: usize,
        organization: &str,
        repository: &str,
        pr_number: u32,
        kind: ImportKind,
    ) -> Result<(), ImportError>;
}
