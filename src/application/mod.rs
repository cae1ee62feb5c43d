//! Application layer services implementing business logic.
//!
//! Services consume the domain's store trait and the probe pool and give
//! HTTP handlers a small API that speaks [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short URL creation, lookup and listing

pub mod services;
