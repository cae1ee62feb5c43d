//! Handler for listing the caller's short URLs.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Response},
};

use crate::api::dto::urls::UserUrl;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::owner_cookie::Owner;

/// Lists the caller's short URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// A caller without a `user_id` cookie gets an empty list and a fresh cookie.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let owner = Owner::from_headers(&headers);

    let entries = state.link_service.list_for_owner(&owner.id).await?;

    let urls: Vec<UserUrl> = entries
        .into_iter()
        .map(|entry| UserUrl {
            short_url: state.link_service.short_url(&entry.code),
            code: entry.code,
            original_url: entry.url,
            created_at: entry.created_at,
        })
        .collect();

    let mut response = Json(urls).into_response();
    if let Some(cookie) = owner.set_cookie_header() {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(response)
}
