//! Short URL creation and lookup service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::{StoreError, UrlStore};
use crate::domain::url_processor::UrlProcessor;
use crate::error::AppError;

/// Coordinates the store and the background probe pool for HTTP handlers.
///
/// The store write is the only step that can fail a request. Handing the URL
/// to the processor happens afterwards and never blocks: a full queue drops
/// the probe.
pub struct LinkService {
    store: Arc<dyn UrlStore>,
    processor: Option<Arc<UrlProcessor>>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix for generated short URLs; a trailing
    /// slash is ignored.
    pub fn new(
        store: Arc<dyn UrlStore>,
        processor: Option<Arc<UrlProcessor>>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            processor,
            base_url,
        }
    }

    /// Stores a URL and queues it for probing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty URL or malformed alias,
    /// [`AppError::Conflict`] if the alias is taken, and
    /// [`AppError::Internal`] on backend failures.
    pub async fn shorten(
        &self,
        url: String,
        alias: Option<String>,
        owner: &str,
    ) -> Result<String, AppError> {
        let new_entry = NewUrlEntry::new(url.clone())
            .with_alias(alias)
            .with_owner(Some(owner.to_string()));

        let code = self.store.put(new_entry).await?;

        if let Some(processor) = &self.processor {
            processor.try_submit(url);
        }

        Ok(code)
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        self.store.get(code).await.map_err(|e| match e {
            StoreError::NotFound => {
                AppError::not_found("Short URL not found", json!({ "code": code }))
            }
            other => other.into(),
        })
    }

    /// Lists an owner's entries, newest first.
    pub async fn list_for_owner(&self, owner: &str) -> Result<Vec<UrlEntry>, AppError> {
        Ok(self.store.list_by_owner(owner).await?)
    }

    /// Returns the number of stored entries.
    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.store.count().await?)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/r/{}", self.base_url, code)
    }
}
