//! Probe model for asynchronous link validation.
//!
//! A probe is a bounded-time HEAD request against a shortened URL's target.
//! Probes run in the background after the store write has committed, so a
//! failed probe is data carried in a [`ProbeResult`], never an error returned
//! to the caller that shortened the URL.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Why a probe did not produce a response.
///
/// Every variant is terminal for the job: the processor never retries.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(String),

    #[error("probe cancelled by shutdown")]
    Cancelled,
}

/// Metadata recorded from a successful HEAD response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub content_type: String,
}

/// Outcome of processing one submitted URL.
///
/// Results are produced at most once per job and are not correlated back to
/// a store entry.
#[derive(Debug)]
pub struct ProbeResult {
    pub url: String,
    pub status: Option<u16>,
    pub content_type: String,
    pub failure: Option<ProbeFailure>,
    pub elapsed: Duration,
}

impl ProbeResult {
    /// Builds a result from a probe outcome and the wall-clock time it took.
    pub fn from_outcome(
        url: String,
        outcome: Result<ProbeResponse, ProbeFailure>,
        elapsed: Duration,
    ) -> Self {
        match outcome {
            Ok(response) => Self {
                url,
                status: Some(response.status),
                content_type: response.content_type,
                failure: None,
                elapsed,
            },
            Err(failure) => Self {
                url,
                status: None,
                content_type: String::new(),
                failure: Some(failure),
                elapsed,
            },
        }
    }

    /// Returns true if the target answered, whatever the status code.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Performs a single network check against a URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::probe::HttpProber`] - `reqwest` HEAD requests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probes `url` and returns the response metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeFailure`] on parse, connection or timeout errors.
    async fn probe(&self, url: &str) -> Result<ProbeResponse, ProbeFailure>;
}
