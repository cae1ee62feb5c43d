//! DTOs for the per-owner listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the caller's short URLs.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserUrl {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}
