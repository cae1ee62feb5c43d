//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::owner_cookie::Owner;

/// Creates a short URL for the caller.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "home" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "code": "home", "url": "http://localhost:8080/r/home" }
/// ```
///
/// The caller is identified by the `user_id` cookie; a new one is issued
/// when absent. After the store write the URL is offered to the probe
/// pool and dropped if the queue is full.
///
/// # Errors
///
/// - 400 if the URL is empty or the alias is malformed
/// - 409 if the alias is already taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Response, AppError> {
    let owner = Owner::from_headers(&headers);

    let code = state
        .link_service
        .shorten(payload.url.clone(), payload.alias, &owner.id)
        .await?;

    let short_url = state.link_service.short_url(&code);

    let logged = (payload.url, short_url.clone(), owner.id.clone());
    tokio::spawn(async move {
        let (url, short_url, owner) = logged;
        tracing::info!(url = %url, short_url = %short_url, owner = %owner, "Shortened URL");
    });

    let mut response = (
        StatusCode::CREATED,
        Json(ShortenResponse {
            code,
            url: short_url,
        }),
    )
        .into_response();

    if let Some(cookie) = owner.set_cookie_header() {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(response)
}
