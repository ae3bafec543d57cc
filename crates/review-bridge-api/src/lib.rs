//! # Review-Bridge HTTP Service
//!
//! HTTP surface for receiving forge webhooks and dispatching them through
//! the Review-Bridge core.
//!
//! This library provides:
//! - The webhook endpoint with signature verification and typed dispatch
//! - A health check endpoint
//! - A Prometheus metrics endpoint
//!
//! The binary crate loads configuration, wires collaborators, and calls
//! [`start_server`].

pub mod errors;
pub mod metrics;
pub mod responses;


use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use review_bridge_core::{DispatchError, Dispatcher};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

pub use errors::{ServiceError, WebhookHandlerError};
pub use metrics::ServiceMetrics;
pub use responses::{ErrorResponse, HealthResponse};

/// Header carrying the forge event kind.
pub const EVENT_TYPE_HEADER: &str = "x-github-event";

/// Header carrying the `sha1=<hex>` signature token.
pub const SIGNATURE_HEADER: &str = "x-hub-signature";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: ServiceConfig,

    /// Dispatch pipeline for webhook deliveries
    pub dispatcher: Arc<Dispatcher>,

    /// Metrics collector for observability
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: ServiceConfig,
        dispatcher: Arc<Dispatcher>,
        metrics: Arc<ServiceMetrics>,
    ) -> Self {
        Self {
            config,
            dispatcher,
            metrics,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Service configuration
///
/// Every section and field carries a serde default so an entirely
/// unconfigured environment yields a valid (if permissive) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Webhook intake settings
    pub webhook: WebhookConfig,

    /// Review-server import collaborator settings
    pub import: ImportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            webhook: WebhookConfig::default(),
            import: ImportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Validate operator-supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ConfigurationInvalid`] for values that are
    /// syntactically deserializable but semantically broken.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.server.port == 0 {
            return Err(ServiceError::ConfigurationInvalid {
                message: "server.port must be non-zero".to_string(),
            });
        }

        if !self.webhook.endpoint_path.starts_with('/') {
            return Err(ServiceError::ConfigurationInvalid {
                message: format!(
                    "webhook.endpoint_path must start with '/': {}",
                    self.webhook.endpoint_path
                ),
            });
        }

        if self.import.base_url.is_empty() {
            return Err(ServiceError::ConfigurationInvalid {
                message: "import.base_url must be set".to_string(),
            });
        }
        if !self.import.base_url.starts_with("http://")
            && !self.import.base_url.starts_with("https://")
        {
            return Err(ServiceError::ConfigurationInvalid {
                message: format!(
                    "import.base_url must be an http(s) URL: {}",
                    self.import.base_url
                ),
            });
        }

        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Webhook intake settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Path the forge posts deliveries to.
    pub endpoint_path: String,

    /// Shared secret for signature verification. Absent or empty disables
    /// verification (development only).
    pub secret: Option<String>,

    /// Review-server account handlers act on behalf of.
    pub user: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            endpoint_path: "/webhooks".to_string(),
            secret: None,
            user: String::new(),
        }
    }
}

/// Review-server import collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Base URL of the review server.
    pub base_url: String,

    /// HTTP credentials for the import endpoint.
    pub username: String,
    pub password: String,

    /// Per-request timeout for import calls, in seconds.
    pub timeout_seconds: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            username: String::new(),
            password: String::new(),
            timeout_seconds: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set.
    pub level: String,

    /// Output format: "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    let webhook_routes = Router::new().route(
        state.config.webhook.endpoint_path.as_str(),
        post(handle_webhook),
    );

    let observability_routes = Router::new()
        .route("/health", get(handle_health_check))
        .route("/metrics", get(handle_metrics));

    Router::new()
        .merge(webhook_routes)
        .merge(observability_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

/// Start the HTTP server and serve until shutdown.
///
/// # Errors
///
/// Returns [`ServiceError`] when the listen address cannot be bound or the
/// server loop fails.
pub async fn start_server(
    config: ServiceConfig,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<ServiceMetrics>,
) -> Result<(), ServiceError> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|_| ServiceError::ConfigurationInvalid {
            message: format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            ),
        })?;

    let endpoint_path = config.webhook.endpoint_path.clone();
    let state = AppState::new(config, dispatcher, metrics);
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: addr.to_string(),
                message: e.to_string(),
            })?;

    info!(address = %addr, endpoint = %endpoint_path, "Webhook service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Resolve on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl-c, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

// ============================================================================
// Webhook Handler
// ============================================================================

/// Handle a forge webhook delivery.
///
/// Extracts the event-type and signature headers, hands the raw body to the
/// dispatcher, and maps the result onto the wire contract: 204 on success,
/// 404/400/500 via [`WebhookHandlerError`] otherwise.
#[instrument(skip(state, headers, body), fields(body_len = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookHandlerError> {
    state.metrics.webhooks_received.inc();

    let event_name = headers
        .get(EVENT_TYPE_HEADER)
        .and_then(|value| value.to_str().ok());
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.dispatcher.dispatch(event_name, signature, &body).await {
        Ok(_outcome) => {
            state.metrics.webhooks_dispatched.inc();
            Ok(StatusCode::NO_CONTENT)
        }
        Err(error) => {
            match &error {
                DispatchError::MissingEventHeader | DispatchError::UnresolvedEvent { .. } => {
                    state.metrics.webhooks_unresolved.inc()
                }
                DispatchError::SignatureInvalid => {
                    state.metrics.webhooks_rejected_signature.inc()
                }
                DispatchError::PayloadMalformed(_) => state.metrics.webhooks_rejected_payload.inc(),
                DispatchError::SessionBind(_) | DispatchError::Handler(_) => {
                    state.metrics.webhooks_failed_internal.inc()
                }
            }
            Err(error.into())
        }
    }
}

// ============================================================================
// Observability Handlers
// ============================================================================

/// Basic health check endpoint
async fn handle_health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut registered_events: Vec<String> = state
        .dispatcher
        .registry()
        .registered_types()
        .iter()
        .map(|event_type| event_type.to_string())
        .collect();
    registered_events.sort_unstable();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        registered_events,
        signature_verification: state.config.webhook.secret.as_deref().is_some_and(|s| !s.is_empty()),
    })
}

/// Prometheus text exposition endpoint
async fn handle_metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}
