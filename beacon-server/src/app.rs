use crate::signaling::{RelayHandle, index_handler, ws_handler};
use anyhow::{Context, Result};
use axum::{Router, routing::get};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(relay: RelayHandle) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(relay)
}

/// Serves the relay on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, relay: RelayHandle, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(relay))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}
