//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod metrics;
pub mod redirect;
pub mod shorten;
pub mod urls;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use urls::list_urls_handler;
