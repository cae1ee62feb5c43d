//! API route configuration.
//!
//! The API is unauthenticated; callers are told apart by the `user_id`
//! cookie only.

use crate::api::handlers::{
    health_handler, list_urls_handler, metrics_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL
/// - `GET  /urls`    - List the caller's short URLs
/// - `GET  /health`  - Store and processor health
/// - `GET  /metrics` - Plain-text request metrics
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}
