//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::middleware::metrics::RequestMetrics;
use crate::application::services::LinkService;
use crate::domain::url_processor::UrlProcessor;

/// Cloned per request; every field is a cheap `Arc` handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// `None` when background probing is disabled.
    pub processor: Option<Arc<UrlProcessor>>,
    pub metrics: Arc<RequestMetrics>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        processor: Option<Arc<UrlProcessor>>,
        metrics: Arc<RequestMetrics>,
    ) -> Self {
        Self {
            link_service,
            processor,
            metrics,
        }
    }
}
