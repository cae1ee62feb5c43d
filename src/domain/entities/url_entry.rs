//! URL entry entity representing one shortened link.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Owner recorded when a caller does not supply an identity.
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// A shortened URL with its owner and creation time.
///
/// Entries are created exactly once by a successful store write and are
/// never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlEntry {
    pub code: String,
    pub url: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl UrlEntry {
    /// Creates a new UrlEntry instance.
    pub fn new(code: String, url: String, owner: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            url,
            owner,
            created_at,
        }
    }
}

/// Input data for storing a new URL.
///
/// Empty `alias` and `owner` values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUrlEntry {
    pub url: String,
    pub alias: Option<String>,
    pub owner: Option<String>,
}

impl NewUrlEntry {
    /// Creates an anonymous entry with a generated code.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alias: None,
            owner: None,
        }
    }

    /// Requests a caller-chosen alias instead of a generated code.
    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    /// Associates the entry with an owner identity.
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// Returns the requested alias, ignoring empty strings.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|a| !a.is_empty())
    }

    /// Returns the owner, falling back to [`ANONYMOUS_OWNER`].
    pub fn owner_or_anonymous(&self) -> &str {
        self.owner
            .as_deref()
            .filter(|o| !o.is_empty())
            .unwrap_or(ANONYMOUS_OWNER)
    }
}
