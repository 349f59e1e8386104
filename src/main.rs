//! # DateTime API Main Entry Point
//! 
//! Initializes logging, loads configuration, and serves the time API
//! until interrupted.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datetime_api::config::Config;
use datetime_api::services::api::TimeService;
use datetime_api::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datetime_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting DateTime API v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Listening on {}", config.listen_address());

    let service = TimeService::new();
    let listener = tokio::net::TcpListener::bind(config.listen_address())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.listen_address(), e))?;

    log_system_event("HTTP server started", Some(&config.listen_address()));

    if let Err(e) = axum::serve(listener, service.router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {}", e);
        return Err(anyhow::anyhow!("HTTP server error: {}", e));
    }

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    log_system_event("Shutdown signal received", None);
}
