//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and network probing.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory and PostgreSQL store implementations
//! - [`probe`] - HTTP HEAD prober

pub mod persistence;
pub mod probe;
