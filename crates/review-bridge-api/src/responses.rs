//! Response types for the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    /// Event names with a registered handler, sorted.
    pub registered_events: Vec<String>,
    /// Whether signature verification is active.
    pub signature_verification: bool,
}

/// Sanitized error body returned to webhook senders.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
