//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use chrono::Utc;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// Responds `302 Found` with the stored URL in `Location`. The redirect
/// event is logged from a detached task.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.link_service.resolve(&code).await?;

    tokio::spawn(async move {
        tracing::info!(code = %code, time = %Utc::now().to_rfc3339(), "Redirect");
    });

    Ok((StatusCode::FOUND, [(LOCATION, url)]))
}
