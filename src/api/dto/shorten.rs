//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL. Must be non-empty; not otherwise validated.
    #[serde(default)]
    pub url: String,

    /// Optional custom code (3-20 ASCII letters or digits). Empty means none.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Created short URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    /// Public short URL, `{BASE_URL}/r/{code}`.
    pub url: String,
}
