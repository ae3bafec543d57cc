//! The closed catalog of forge event kinds.
//!
//! The forge announces the kind of every webhook delivery in the
//! `X-Github-Event` header. This module models the known kinds as a closed
//! enum so that handler registration is an explicit, exhaustively testable
//! mapping instead of open-ended runtime discovery. Names the catalog does
//! not know simply fail to parse; the dispatcher turns that into a 404.

use std::fmt;

/// A forge webhook event kind.
///
/// One variant per event name the forge can deliver. Only a subset of these
/// has a registered handler; the rest exist so that resolution can
/// distinguish "known kind, no handler" from garbage header values — both
/// end up unhandled, but the catalog keeps the namespace closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Ping,
    CommitComment,
    Create,
    Delete,
    Fork,
    Gollum,
    IssueComment,
    Issues,
    Member,
    Public,
    PullRequest,
    PullRequestReviewComment,
    Push,
    Release,
    Repository,
    Status,
    TeamAdd,
    Watch,
}

impl EventType {
    /// All catalog entries, in a stable order.
    ///
    /// Used by registration code that wants to walk the whole catalog and by
    /// tests that assert the name round-trip.
    pub const ALL: [EventType; 18] = [
        EventType::Ping,
        EventType::CommitComment,
        EventType::Create,
        EventType::Delete,
        EventType::Fork,
        EventType::Gollum,
        EventType::IssueComment,
        EventType::Issues,
        EventType::Member,
        EventType::Public,
        EventType::PullRequest,
        EventType::PullRequestReviewComment,
        EventType::Push,
        EventType::Release,
        EventType::Repository,
        EventType::Status,
        EventType::TeamAdd,
        EventType::Watch,
    ];

    /// The canonical lowercase wire name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Ping => "ping",
            EventType::CommitComment => "commit_comment",
            EventType::Create => "create",
            EventType::Delete => "delete",
            EventType::Fork => "fork",
            EventType::Gollum => "gollum",
            EventType::IssueComment => "issue_comment",
            EventType::Issues => "issues",
            EventType::Member => "member",
            EventType::Public => "public",
            EventType::PullRequest => "pull_request",
            EventType::PullRequestReviewComment => "pull_request_review_comment",
            EventType::Push => "push",
            EventType::Release => "release",
            EventType::Repository => "repository",
            EventType::Status => "status",
            EventType::TeamAdd => "team_add",
            EventType::Watch => "watch",
        }
    }

    /// Parse an event name from the wire.
    ///
    /// Matching is case-insensitive because header values are not guaranteed
    /// to preserve case end-to-end. Unknown names yield `None`, never an
    /// error.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        EventType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
