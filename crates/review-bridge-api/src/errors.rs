//! Error types for the HTTP service.

use crate::responses::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use review_bridge_core::DispatchError;
use tracing::error;

/// Webhook handler errors with HTTP status code mapping.
///
/// Maps dispatch failures onto the wire contract:
///
/// - `404 Not Found`: missing or unresolvable event-type header — the
///   sender configured an event kind this deployment does not process.
/// - `400 Bad Request`: signature mismatch or malformed payload. The body
///   never reveals which signature sub-check failed, and payload parse
///   diagnostics stay in the server-side log.
/// - `500 Internal Server Error`: session binding failed or a handler
///   misbehaved — server-side problems the sender cannot fix.
///
/// # Security Considerations
///
/// Bodies returned to clients are sanitized; detailed causes are logged
/// server-side only.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// A dispatch pipeline rejection.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// Unexpected server failure outside the dispatch pipeline.
    #[error("internal server error: {message}")]
    Internal { message: String },
}

impl WebhookHandlerError {
    /// The HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookHandlerError::Dispatch(dispatch) => match dispatch {
                DispatchError::MissingEventHeader | DispatchError::UnresolvedEvent { .. } => {
                    StatusCode::NOT_FOUND
                }
                DispatchError::SignatureInvalid | DispatchError::PayloadMalformed(_) => {
                    StatusCode::BAD_REQUEST
                }
                DispatchError::SessionBind(_) | DispatchError::Handler(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            WebhookHandlerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The sanitized message sent back to the caller.
    fn client_message(&self) -> String {
        match self {
            WebhookHandlerError::Dispatch(dispatch) => match dispatch {
                DispatchError::MissingEventHeader | DispatchError::UnresolvedEvent { .. } => {
                    "no handler for event".to_string()
                }
                DispatchError::SignatureInvalid => "signature verification failed".to_string(),
                DispatchError::PayloadMalformed(_) => "malformed payload".to_string(),
                DispatchError::SessionBind(_) | DispatchError::Handler(_) => {
                    "internal error".to_string()
                }
            },
            WebhookHandlerError::Internal { .. } => "internal error".to_string(),
        }
    }
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Webhook request failed server-side");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.client_message(),
            }),
        )
            .into_response()
    }
}

/// Service lifecycle errors for startup and configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Operator configuration is semantically invalid.
    #[error("invalid configuration: {message}")]
    ConfigurationInvalid { message: String },

    /// The listen address could not be bound.
    #[error("cannot bind {address}: {message}")]
    BindFailed { address: String, message: String },

    /// The server loop terminated with an error.
    #[error("server failed: {message}")]
    ServerFailed { message: String },
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
