//! HTTP server mode exposing health and status endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::http::Client;
use crate::status::StatusChecker;

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    client: Arc<Client>,
    checker: StatusChecker,
}

/// Build the router for a client
pub fn router(client: Arc<Client>) -> Router {
    let state = AppState {
        checker: StatusChecker::new(Arc::clone(&client)),
        client,
    };

    // Allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/rate_limit", get(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(client: Arc<Client>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    tracing::info!("Starting HTTP server on http://{}", addr);
    serve_on(listener, client).await
}

/// Serve on an already bound listener
pub async fn serve_on(listener: TcpListener, client: Arc<Client>) -> Result<()> {
    axum::serve(listener, router(client))
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Probe the API and report; 503 when any probe fails
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let report = state.checker.check().await;
    let code = if report.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}

/// Quota snapshot from the client's last exchange
async fn rate_limit(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.client.rate_limit())
}
