//! estateml server - Prediction service for rental pricing, tenant risk
//! scoring and property recommendations.
//!
//! Loads the four model artifacts once at startup and serves single-row
//! predictions over HTTP. Refuses to start if any artifact is missing or its
//! feature schema disagrees with this build.
//!
//! # Usage
//! ```sh
//! MODEL_DIR=data/models cargo run --bin estateml
//! ```
//!
//! # Environment Variables
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0:8000)
//! - `MODEL_DIR` - Directory holding the model artifacts (default: data/models)

use std::sync::Arc;

use anyhow::{Context, Result};
use estateml::config::Config;
use estateml::infrastructure::ModelStore;
use estateml::interfaces::http;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("estateml {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: bind={}, model_dir={:?}",
        config.bind_addr, config.model_dir
    );

    let store = ModelStore::load(&config)
        .context("Model artifacts could not be loaded; refusing to serve")?;
    let service = Arc::new(store.into_service());

    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Serving predictions on {}", config.bind_addr);
    info!("Press Ctrl+C to shutdown.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received. Draining...");
}
