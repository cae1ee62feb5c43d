//! In-memory implementation of the URL store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::{StoreError, UrlStore, validate_new_entry};
use crate::utils::code_generator::generate_code;

#[derive(Default)]
struct Inner {
    urls: HashMap<String, UrlEntry>,
    /// Codes per owner in insertion order.
    by_owner: HashMap<String, Vec<String>>,
}

/// Process-local store backed by two maps behind one lock.
///
/// The code map and the owner index share a single [`RwLock`]: every
/// mutation and every length read takes it, so the uniqueness check and
/// the insert happen in the same critical section. Lookups take the shared
/// side and never block each other.
#[derive(Default)]
pub struct InMemoryUrlStore {
    inner: RwLock<Inner>,
}

impl InMemoryUrlStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn put(&self, new_entry: NewUrlEntry) -> Result<String, StoreError> {
        validate_new_entry(&new_entry)?;

        let owner = new_entry.owner_or_anonymous().to_string();
        let mut inner = self.inner.write().await;

        let code = match new_entry.alias() {
            Some(alias) => {
                if inner.urls.contains_key(alias) {
                    return Err(StoreError::AliasInUse);
                }
                alias.to_string()
            }
            None => loop {
                let code = generate_code()?;
                if !inner.urls.contains_key(&code) {
                    break code;
                }
            },
        };

        let entry = UrlEntry::new(code.clone(), new_entry.url, owner.clone(), Utc::now());
        inner.urls.insert(code.clone(), entry);
        inner.by_owner.entry(owner).or_default().push(code.clone());

        Ok(code)
    }

    async fn get(&self, code: &str) -> Result<String, StoreError> {
        let inner = self.inner.read().await;

        inner
            .urls
            .get(code)
            .map(|entry| entry.url.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<UrlEntry>, StoreError> {
        let inner = self.inner.read().await;

        let Some(codes) = inner.by_owner.get(owner) else {
            return Ok(Vec::new());
        };

        // Newest insertion first so the stable sort keeps it ahead on timestamp ties.
        let mut entries: Vec<UrlEntry> = codes
            .iter()
            .rev()
            .filter_map(|code| inner.urls.get(code).cloned())
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(entries)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.urls.len() as u64)
    }
}
