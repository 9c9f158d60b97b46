//! `locgate serve`: run the telemetry receive gateway.

use crate::error::{GatewayError, Result};
use crate::gateway::{router, GatewayState, TerminalStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub async fn handle_serve(listen: &str, data_file: PathBuf) -> Result<()> {
    let addr: SocketAddr = listen
        .parse()
        .map_err(|_| GatewayError::config(format!("invalid listen address '{}'", listen)))?;

    let store = TerminalStore::load(&data_file);
    let state = Arc::new(GatewayState { store, data_file });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "telemetry gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
