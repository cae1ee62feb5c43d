//! Store trait for short code data access.

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::utils::code_generator::validate_alias;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by [`UrlStore`] operations.
///
/// Store errors are returned synchronously to the caller and are never
/// retried by the store itself. Collisions between generated codes are
/// retried internally and never surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("URL is required")]
    InvalidInput,

    #[error("invalid alias: must be 3-20 alphanumeric characters")]
    InvalidAlias,

    #[error("custom alias is already in use")]
    AliasInUse,

    #[error("code not found")]
    NotFound,

    /// Connection or schema failure while constructing a backend.
    #[error("store backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("failed to generate short code: {0}")]
    CodeGeneration(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Checks the parts of a [`NewUrlEntry`] every backend rejects up front.
///
/// # Errors
///
/// - [`StoreError::InvalidInput`] if the URL is empty
/// - [`StoreError::InvalidAlias`] if an alias is given and malformed
pub fn validate_new_entry(new_entry: &NewUrlEntry) -> Result<(), StoreError> {
    if new_entry.url.is_empty() {
        return Err(StoreError::InvalidInput);
    }

    if let Some(alias) = new_entry.alias() {
        validate_alias(alias)?;
    }

    Ok(())
}

/// Store interface mapping short codes to URLs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryUrlStore`] - lock-protected maps
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// Both backends honour the same contract, including the ordering of
/// [`UrlStore::list_by_owner`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Stores a URL and returns its short code.
    ///
    /// Uses the requested alias when present, otherwise generates a random
    /// code and retries until it does not collide with an existing one.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidInput`] if the URL is empty
    /// - [`StoreError::InvalidAlias`] if the alias is malformed
    /// - [`StoreError::AliasInUse`] if the alias already exists
    ///
    /// A failed put leaves no entry behind.
    async fn put(&self, new_entry: NewUrlEntry) -> Result<String, StoreError>;

    /// Resolves a code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the code does not exist.
    async fn get(&self, code: &str) -> Result<String, StoreError>;

    /// Lists the entries created by `owner`, newest first.
    ///
    /// An owner with no entries yields an empty vector.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<UrlEntry>, StoreError>;

    /// Counts stored entries. Diagnostics only.
    async fn count(&self) -> Result<u64, StoreError>;
}
