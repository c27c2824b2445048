//! HTTP server: shared state, routing, and lifecycle
//!
//! The transport layer owns correlation ids, error envelopes and status
//! codes; everything order-shaped lives in [`crate::core`].

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::Result;
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::core::service::OrderService;
use crate::storage::OrderStore;

/// Correlation header read from requests and echoed on every response
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderService>,
    pub store: Arc<dyn OrderStore>,
    /// Parent of each request's cancellation token; cancelled on shutdown
    /// so in-flight queries abort instead of racing connection teardown
    pub shutdown: CancellationToken,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", get(handlers::get_orders))
        .route("/api/orders/debug", get(handlers::debug_orders))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the application with graceful shutdown
///
/// Binds the address, serves until SIGTERM or Ctrl+C, and cancels the
/// state's shutdown token before draining connections.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let shutdown = state.shutdown.clone();
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown.cancel();
        })
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
