//! Request counting middleware and the plain-text metrics report.

use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Response header carrying the per-request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID assigned by [`layer`], available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// In-process request counters.
///
/// Constructed once at startup and shared through application state.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    total: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
    /// Moving average in microseconds; zero until the first request.
    average_latency_us: AtomicU64,
    path_counts: DashMap<String, u64>,
}

/// Point-in-time copy of [`RequestMetrics`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub average_latency: Duration,
    pub path_counts: BTreeMap<String, u64>,
}

impl MetricsSnapshot {
    /// Percentage of requests answered below 400; zero when idle.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total as f64 * 100.0
    }
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed request.
    pub fn record(&self, path: &str, status: u16, latency: Duration) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if status >= 400 {
            self.failed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.successful.fetch_add(1, Ordering::Relaxed);
        }

        *self.path_counts.entry(path.to_string()).or_insert(0) += 1;

        let sample = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        let _ = self
            .average_latency_us
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(if current == 0 {
                    sample
                } else {
                    current / 2 + sample / 2
                })
            });
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            successful: self.successful.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            average_latency: Duration::from_micros(self.average_latency_us.load(Ordering::Relaxed)),
            path_counts: self
                .path_counts
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
        }
    }

    /// Renders the plain-text report served at `/api/metrics`.
    pub fn render(&self) -> String {
        let snapshot = self.snapshot();
        let mut out = String::new();

        let _ = writeln!(out, "# URL Shortener Metrics\n");
        let _ = writeln!(out, "Total Requests: {}", snapshot.total);
        let _ = writeln!(out, "Successful Requests: {}", snapshot.successful);
        let _ = writeln!(out, "Failed Requests: {}", snapshot.failed);
        let _ = writeln!(out, "Success Rate: {:.2}%", snapshot.success_rate());
        let _ = writeln!(out, "Average Latency: {:?}\n", snapshot.average_latency);

        let _ = writeln!(out, "# Requests by Path\n");
        for (path, count) in &snapshot.path_counts {
            let _ = writeln!(out, "{path}: {count}");
        }

        out
    }
}

/// Assigns a request ID and records the request in [`RequestMetrics`].
///
/// Paths are counted by route template (`/r/{code}`) when the router matched
/// one, otherwise by the raw URI path.
pub async fn layer(
    State(metrics): State<Arc<RequestMetrics>>,
    mut req: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let started = Instant::now();

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let method = req.method().clone();

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(req).await;

    let latency = started.elapsed();
    let status = response.status().as_u16();
    metrics.record(&path, status, latency);

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status,
        latency_us = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
