//! Permadrop API Library
//!
//! This crate provides the HTTP surface of the upload gateway: the multipart
//! upload handler, HTTP error mapping, and router assembly. The storage
//! network client is injected as an `UploadOrchestrator` trait object by the
//! embedding binary.

mod handlers;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::HeaderValue;
use permadrop_core::{Config, MAX_UPLOAD_SIZE_BYTES};
use permadrop_orchestrator::UploadOrchestrator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Extra request-body headroom for multipart framing on top of the
/// plaintext ceiling. Bodies within the headroom reach the size policy;
/// bodies beyond it trip this limit, and the form extractor maps that
/// failure to the same size-limit error.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

fn build_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Assemble the gateway router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors(&state.config);

    Router::new()
        .route("/api/v0/files", post(handlers::upload_file))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_SIZE_BYTES as usize + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Initialize tracing with env-filter (defaults to `info`)
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Bind and serve the gateway with the given orchestrator backend
pub async fn serve(
    config: Config,
    orchestrator: Arc<dyn UploadOrchestrator>,
) -> Result<(), anyhow::Error> {
    let port = config.server_port;
    let state = Arc::new(AppState::new(config, orchestrator));
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(port = port, "Permadrop gateway listening");
    axum::serve(listener, router).await?;

    Ok(())
}
