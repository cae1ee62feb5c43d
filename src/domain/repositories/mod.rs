//! Store trait definitions for the domain layer.
//!
//! The [`UrlStore`] trait abstracts over the two interchangeable backends.
//! Implementations live in `crate::infrastructure::persistence` and are
//! selected at startup.
//!
//! # Testing
//!
//! A mock implementation is generated via `mockall` for unit tests. See
//! `tests/repository_pg.rs` for the PostgreSQL integration tests.

pub mod url_store;

pub use url_store::{StoreError, UrlStore, validate_new_entry};

#[cfg(test)]
pub use url_store::MockUrlStore;
