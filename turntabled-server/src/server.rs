//! HTTP server.

use crate::config::Config;
use crate::error::ServerError;
use crate::routes::router;
use std::sync::Arc;
use turntabled_core::TurntableEngine;

/// Binds the configured address and serves until shutdown.
pub async fn run_server(config: Config, engine: Arc<TurntableEngine>) -> Result<(), ServerError> {
    let app = router(engine);

    let listener = tokio::net::TcpListener::bind(config.network.bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "turntabled HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("received shutdown signal, stopping server");
}
