//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{code}` - Short link redirect
//! - `/api/*`         - JSON API, health and metrics
//!
//! # Middleware
//!
//! - **Metrics** - Request ID assignment and counters (outermost)
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::{metrics, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let metrics_state = state.metrics.clone();

    Router::new()
        .route("/r/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
        .layer(middleware::from_fn_with_state(metrics_state, metrics::layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::metrics::{REQUEST_ID_HEADER, RequestMetrics};
    use crate::application::services::LinkService;
    use crate::infrastructure::persistence::InMemoryUrlStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let store = Arc::new(InMemoryUrlStore::new());
        let link_service = Arc::new(LinkService::new(store, None, "http://localhost:8080"));
        AppState::new(link_service, None, Arc::new(RequestMetrics::new()))
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_and_counted() {
        let state = test_state();
        let metrics = state.metrics.clone();
        let app = app_router(state);

        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.failed, 1);
    }

    #[tokio::test]
    async fn test_redirect_route_counted_by_template() {
        let state = test_state();
        let metrics = state.metrics.clone();
        let app = app_router(state);

        let response = app
            .oneshot(Request::get("/r/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(metrics.snapshot().path_counts.get("/r/{code}"), Some(&1));
    }
}
