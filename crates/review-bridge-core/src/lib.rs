//! # Review-Bridge Core
//!
//! Domain logic for the Review-Bridge webhook ingestion and dispatch service.
//!
//! This crate contains everything needed to receive a forge webhook callback
//! and turn it into an action against the review server:
//!
//! - [`event`] — the closed catalog of forge event kinds
//! - [`signature`] — keyed-digest authentication of raw request bodies
//! - [`payload`] — typed, unknown-field-tolerant payload decoding
//! - [`handler`] / [`handlers`] — per-event-type processing logic
//! - [`registry`] — the immutable event-type → handler mapping
//! - [`dispatch`] — the per-request orchestration pipeline
//! - [`import`] / [`session`] — collaborator seams provided by the hosting
//!   deployment (pull-request import, session binding)
//!
//! ## Architecture
//!
//! The core depends only on trait abstractions for anything that touches the
//! review server; infrastructure implementations are injected at startup.
//! The registry is built once, wrapped in an `Arc`, and never mutated
//! afterwards, so concurrent dispatches share it without locking.
//!
//! ## Usage
//!
//! ```rust
//! use review_bridge_core::event::EventType;
//! use review_bridge_core::signature::SignatureVerifier;
//!
//! let verifier = SignatureVerifier::permissive();
//! assert!(verifier.verify(None, b"{}"));
//! assert_eq!(EventType::from_name("PULL_REQUEST"), Some(EventType::PullRequest));
//! ```

pub mod dispatch;
pub mod event;
pub mod handler;
pub mod handlers;
pub mod import;
pub mod payload;
pub mod registry;
pub mod session;
pub mod signature;

pub use dispatch::{DispatchError, Dispatcher};
pub use event::EventType;
pub use handler::{EventHandler, HandlerError, Outcome, PayloadKind};
pub use import::{ImportError, ImportKind, PullRequestImporter};
pub use payload::{EventPayload, PayloadError, PingPayload, PullRequestPayload};
pub use registry::EventTypeRegistry;
pub use session::{SessionBinder, SessionContext, SessionError};
pub use signature::SignatureVerifier;
