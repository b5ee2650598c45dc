//! Admin HTTP surface.
//!
//! - `GET /status`: status, support flags and scheduling state as JSON
//! - `GET /healthz`: 200 when `ready`, 503 otherwise

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::status::StatusRegistry;
use self::handlers::{get_healthz, get_status};

pub fn setup_admin_router(registry: Arc<StatusRegistry>) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/healthz", get(get_healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// Serve the admin router until `shutdown` resolves.
pub async fn serve<F>(
    addr: SocketAddr,
    registry: Arc<StatusRegistry>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Admin endpoint listening");
    axum::serve(listener, setup_admin_router(registry))
        .with_graceful_shutdown(shutdown)
        .await
}
