//! `reqwest`-backed HEAD prober.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

use crate::domain::probe::{ProbeFailure, ProbeResponse, Prober};

/// Per-request timeout used when none is configured.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("linkstash/", env!("CARGO_PKG_VERSION"), " (link probe)");

/// Issues a single HEAD request per probe with a fixed timeout.
///
/// Redirects are followed with `reqwest`'s default policy, so the recorded
/// status is the status of the final hop.
#[derive(Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    /// Creates a prober with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Returns the configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Parses a probe target, assuming `http` when no scheme is present.
///
/// `example.com` fails as a relative URL and `example.com:8080/x` parses
/// with `example.com` as the scheme; both are retried with an `http://` prefix.
pub fn parse_target(raw: &str) -> Result<Url, ProbeFailure> {
    let raw = raw.trim();

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        Ok(url) if url.cannot_be_a_base() || url.host().is_none() => {
            Ok(Url::parse(&format!("http://{raw}"))?)
        }
        Ok(url) => Err(ProbeFailure::Request(format!(
            "unsupported scheme: {}",
            url.scheme()
        ))),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Url::parse(&format!("http://{raw}"))?),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, ProbeFailure> {
        let target = parse_target(url)?;

        let response = self.client.head(target).send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeFailure::Timeout(self.timeout)
            } else {
                ProbeFailure::Request(e.to_string())
            }
        })?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            content_type,
        })
    }
}
