//! Domain layer containing business entities and logic.
//!
//! Defines entities, the store contract, and the background probe pool
//! independent of HTTP concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait and error taxonomy
//! - [`probe`] - Probe result model and the [`probe::Prober`] seam
//! - [`url_processor`] - Bounded worker pool running probes
//!
//! # Probe Flow
//!
//! 1. HTTP handler stores the URL and responds immediately
//! 2. The URL is offered to [`url_processor::UrlProcessor`] (dropped if the queue is full)
//! 3. A worker runs a bounded-time probe
//! 4. [`url_processor::run_result_logger`] logs the [`probe::ProbeResult`]

pub mod entities;
pub mod probe;
pub mod repositories;
pub mod url_processor;
