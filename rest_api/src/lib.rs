use axum::{
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use anyhow::Context;

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod services;
pub mod state;

pub use config::{load_server_config, ServerConfig};
pub use errors::ApiError;
pub use state::AppState;

// Handler for the /api/v1/health endpoint
async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "Hospital REST API is healthy" })),
    )
}

// Handler for the /api/v1/version endpoint
async fn version_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "version": env!("CARGO_PKG_VERSION"), "api_level": 1 })),
    )
}

/// Assembles the full application router over the shared state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    let api = Router::new()
        .route("/health", get(health_check_handler))
        .route("/version", get(version_handler))
        .merge(auth::router())
        .merge(handlers::patients::router())
        .merge(handlers::doctors::router())
        .merge(handlers::nurses::router())
        .merge(handlers::departments::router())
        .merge(handlers::rooms::router())
        .merge(handlers::appointments::router())
        .merge(handlers::prescriptions::router())
        .merge(handlers::medical_records::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
}

/// Main function to start the REST API server.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), anyhow::Error> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    info!("REST API server listening on {}", addr);

    let shutdown_signal = async {
        let _ = shutdown_rx.await;
        info!("Received shutdown signal.");
    };

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("REST API server failed to start or run")?;

    info!("REST API server stopped.");
    Ok(())
}
