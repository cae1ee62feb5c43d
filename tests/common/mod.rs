#![allow(dead_code)]

use axum_test::TestServer;
use linkstash::api::middleware::metrics::RequestMetrics;
use linkstash::application::services::LinkService;
use linkstash::domain::repositories::UrlStore;
use linkstash::domain::url_processor::UrlProcessor;
use linkstash::infrastructure::persistence::InMemoryUrlStore;
use linkstash::routes::app_router;
use linkstash::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://short.test";

pub fn create_test_state() -> (AppState, Arc<InMemoryUrlStore>) {
    let store = Arc::new(InMemoryUrlStore::new());
    let state = create_state_with(store.clone(), None);
    (state, store)
}

pub fn create_state_with(
    store: Arc<dyn UrlStore>,
    processor: Option<Arc<UrlProcessor>>,
) -> AppState {
    let link_service = Arc::new(LinkService::new(store, processor.clone(), BASE_URL));
    AppState::new(link_service, processor, Arc::new(RequestMetrics::new()))
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Extracts the `user_id` value from a `Set-Cookie` header.
pub fn owner_from_set_cookie(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("user_id="))
        .unwrap()
        .to_string()
}
