//! turntabled - HATEOAS Turntable API
//!
//! Serves a single turntable resource over HTTP; every response carries
//! the set of actions legal from the current state.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use turntabled_catalog::FileCatalog;
use turntabled_core::{TrackCatalog, TurntableEngine};
use turntabled_server::{run_server, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration (from file if TURNTABLED_CONFIG is set, then env overrides)
    let config = match Config::load() {
        Ok(c) => {
            if let Ok(path) = std::env::var("TURNTABLED_CONFIG") {
                tracing::info!("Loaded config from {}", path);
            }
            c
        }
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Starting turntabled server");
    tracing::info!("  Bind address: {}", config.network.bind_addr);
    tracing::info!("  Track catalog: {}", config.catalog.tracks_path.display());

    // Load the track catalog once. An unavailable catalog does not stop
    // the server; vinyl loads report the failure instead.
    let catalog = Arc::new(FileCatalog::load(&config.catalog.tracks_path));
    if catalog.is_available() {
        tracing::info!("  Catalog: {} track(s)", catalog.tracks().len());
    } else {
        tracing::warn!(
            "  Catalog: unavailable ({})",
            catalog
                .load_error()
                .unwrap_or_else(|| "unknown".to_string())
        );
    }

    // Create the engine in its initial state; validates the transition table
    let engine = Arc::new(TurntableEngine::new(catalog)?);

    // Run server (blocks until shutdown)
    run_server(config, engine).await?;

    tracing::info!("Server stopped");
    Ok(())
}
