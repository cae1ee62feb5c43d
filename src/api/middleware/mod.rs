//! HTTP middleware for request processing and observability.

pub mod metrics;
pub mod tracing;
