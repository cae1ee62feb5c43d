//! URL store implementations.
//!
//! # Backends
//!
//! - [`InMemoryUrlStore`] - Process-local maps, lost on restart
//! - [`PgUrlStore`] - PostgreSQL via SQLx runtime queries

pub mod memory_url_store;
pub mod pg_url_store;

pub use memory_url_store::InMemoryUrlStore;
pub use pg_url_store::{PgPoolSettings, PgUrlStore};
