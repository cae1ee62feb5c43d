//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Input rules
//! are enforced by the store, not at deserialization time.

pub mod health;
pub mod shorten;
pub mod urls;
