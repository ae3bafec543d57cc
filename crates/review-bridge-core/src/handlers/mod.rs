//! Built-in event handlers.

mod ping;
mod pull_request;

pub use ping::PingHandler;
pub use pull_request::PullRequestHandler;
