//! lending-api: HTTP surface for the direct lending graph.
//!
//! Serves vis.js-ready graph views over a shared `GraphSource`, plus an
//! optional static front-end.

pub mod config;
pub mod error;
pub mod handlers;

use std::path::Path;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use lending_core::GraphSource;

pub use config::{ApiConfig, ServerConfig};
pub use error::{ApiError, ErrorResponse};

/// Shared request state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn GraphSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn GraphSource>) -> Self {
        Self { source }
    }
}

/// Build the router. Unmatched paths fall through to `static_dir` when given.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/graph", get(handlers::full_graph))
        .route("/api/graph/:label/:name", get(handlers::ego_graph))
        .route("/api/node/:label/:name", get(handlers::node))
        .route("/api/entities", get(handlers::entities))
        .route("/api/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
