//! # Review-Bridge Service
//!
//! Binary entry point for the Review-Bridge HTTP service.
//!
//! This executable:
//! - Loads configuration from files and environment
//! - Initializes observability (logging)
//! - Wires the dispatch pipeline and its collaborators
//! - Starts the HTTP server from review-bridge-api

mod importer;
mod session;

use importer::RestPullRequestImporter;
use review_bridge_api::{start_server, ServiceConfig, ServiceMetrics};
use review_bridge_core::{Dispatcher, EventTypeRegistry, SignatureVerifier};
use session::StaticSessionBinder;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // -------------------------------------------------------------------------
    // Load configuration
    //
    // Sources (applied in order — later sources override earlier ones):
    //  1. /etc/review-bridge/service.yaml   — system-wide defaults
    //  2. ./config/service.yaml             — deployment-local override
    //  3. Path given by RB_CONFIG_FILE env  — operator-specified file
    //  4. Environment variables prefixed RB__ (double-underscore separator)
    //     e.g. RB__SERVER__PORT=9090 sets server.port = 9090
    //
    // All configuration fields carry serde defaults, so absent files or an
    // entirely unconfigured environment produces a valid config with
    // built-in defaults. A malformed file or an environment variable that
    // cannot be coerced to the correct type IS a hard error because it
    // indicates deliberate-but-broken operator configuration.
    // -------------------------------------------------------------------------
    let mut config_builder = config::Config::builder()
        .add_source(
            config::File::with_name("/etc/review-bridge/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        )
        .add_source(
            config::File::with_name("config/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

    // Optional explicit path supplied by the operator.
    if let Ok(explicit_path) = std::env::var("RB_CONFIG_FILE") {
        if !explicit_path.is_empty() {
            config_builder = config_builder.add_source(
                config::File::with_name(&explicit_path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
        }
    }

    let raw_config = match config_builder
        .add_source(config::Environment::with_prefix("RB").separator("__"))
        .build()
    {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to build configuration; aborting: {}", e);
            std::process::exit(3);
        }
    };

    let service_config: ServiceConfig = match raw_config.try_deserialize() {
        Ok(sc) => sc,
        Err(e) => {
            eprintln!(
                "Could not deserialize service configuration; aborting. \
                 Fix the configuration and restart: {}",
                e
            );
            std::process::exit(3);
        }
    };

    if let Err(e) = service_config.validate() {
        eprintln!("Service configuration is invalid; aborting: {}", e);
        std::process::exit(3);
    }

    // -------------------------------------------------------------------------
    // Initialize logging
    //
    // RUST_LOG overrides the configured level; logging.format selects
    // between human-readable and JSON output.
    // -------------------------------------------------------------------------
    let level = service_config.logging.level.clone();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "review_bridge_service={level},review_bridge_api={level},\
             review_bridge_core={level},tower_http=debug"
        ))
    });

    if service_config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("Starting Review-Bridge Service");

    // -------------------------------------------------------------------------
    // Wire the dispatch pipeline
    //
    // The registry is built once here and never mutated again; concurrent
    // request tasks share it through the dispatcher's Arc.
    // -------------------------------------------------------------------------
    let importer = match RestPullRequestImporter::new(&service_config.import) {
        Ok(importer) => Arc::new(importer),
        Err(e) => {
            error!(error = %e, "Cannot construct the pull-request importer; aborting");
            std::process::exit(3);
        }
    };

    let registry = Arc::new(EventTypeRegistry::with_builtin_handlers(importer));
    for event_type in registry.registered_types() {
        info!(%event_type, "Webhook handler active");
    }

    let verifier = SignatureVerifier::new(service_config.webhook.secret.clone());
    let sessions = Arc::new(StaticSessionBinder::new(service_config.webhook.user.clone()));
    let dispatcher = Arc::new(Dispatcher::new(registry, verifier, sessions));

    let metrics = match ServiceMetrics::new() {
        Ok(metrics) => metrics,
        Err(e) => {
            error!(error = %e, "Cannot register service metrics; aborting");
            std::process::exit(3);
        }
    };

    // -------------------------------------------------------------------------
    // Serve
    // -------------------------------------------------------------------------
    if let Err(e) = start_server(service_config, dispatcher, metrics).await {
        error!(error = %e, "HTTP server failed");
        return Err(Box::new(e) as Box<dyn std::error::Error>);
    }

    info!("Review-Bridge Service stopped");
    Ok(())
}
