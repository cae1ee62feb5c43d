//! Handler for the plain-text metrics report.

use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};

use crate::state::AppState;

/// Returns request counters as plain text.
///
/// # Endpoint
///
/// `GET /api/metrics`
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}
