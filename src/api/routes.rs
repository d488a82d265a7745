//! API route configuration.

use crate::api::handlers::{health_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create (or reuse) a short link
/// - `GET  /health`  - Health check: store, click queue, cache
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
}
