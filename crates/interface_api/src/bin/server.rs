//! Policy Request Console - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin console-api
//!
//! # Run with environment variables
//! CONSOLE_PORT=9090 CONSOLE_WIZARD__MIN_LOADING_MS=500 cargo run --bin console-api
//! ```
//!
//! # Environment Variables
//!
//! * `CONSOLE_HOST` - Server host (default: 0.0.0.0)
//! * `CONSOLE_PORT` - Server port (default: 8080)
//! * `CONSOLE_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `CONSOLE_WIZARD__MIN_LOADING_MS` - Minimum loading screen time (default: 2000)
//! * `CONSOLE_ASSISTANT__BACKEND` - `simulated` or `disabled` (default: simulated)
//! * `CONSOLE_ASSISTANT__SUGGESTION_TIMEOUT_MS` - default: 15000
//! * `CONSOLE_ASSISTANT__QUOTATION_TIMEOUT_MS` - default: 30000

use interface_api::{config::ApiConfig, create_router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// # Errors
///
/// Returns an error if the server address is invalid or cannot be bound.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let (config, config_error) = match ApiConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (ApiConfig::default(), Some(err)),
    };

    init_tracing(&config.log_level);

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Invalid configuration, using defaults");
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        min_loading_ms = config.wizard.min_loading_ms,
        assistant = ?config.assistant.backend,
        "Starting Policy Request Console API Server"
    );

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_router(AppState::new(config));

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
