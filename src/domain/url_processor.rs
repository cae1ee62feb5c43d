//! Bounded worker pool that probes submitted URLs in the background.
//!
//! # Lifecycle
//!
//! Each worker moves through `Running -> Stopping -> Exited`. A worker stops
//! when the pool is cancelled or when the job queue is closed and empty.
//! The result stream closes once every worker has exited, so consumers treat
//! end-of-stream as pool termination.
//!
//! Cancellation takes priority over delivery: a result that becomes ready
//! while the pool is shutting down may be dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::domain::probe::{ProbeFailure, ProbeResult, Prober};

/// Default number of workers in the pool.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Default upper bound on a single probe.
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(5);

/// Sizing and timing of a [`UrlProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub workers: usize,
    pub queue_capacity: usize,
    pub job_timeout: Duration,
}

impl ProcessorConfig {
    /// Creates a config with a queue twice the size of the pool.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            queue_capacity: workers.saturating_mul(2),
            job_timeout: DEFAULT_JOB_TIMEOUT,
        }
    }

    /// Overrides the per-job timeout.
    pub fn with_job_timeout(mut self, job_timeout: Duration) -> Self {
        self.job_timeout = job_timeout;
        self
    }

    /// Overrides the job queue capacity.
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::with_workers(DEFAULT_WORKER_COUNT)
    }
}

type JobQueue = Arc<AsyncMutex<mpsc::Receiver<String>>>;

/// Fixed-size pool of probe workers fed by a bounded queue.
///
/// The processor is decoupled from the store: nothing it does affects
/// whether a URL was shortened.
///
/// # Usage Flow
///
/// 1. [`UrlProcessor::start`] spawns the workers
/// 2. A consumer takes the stream once via [`UrlProcessor::results`]
/// 3. Handlers enqueue URLs with [`UrlProcessor::try_submit`]
/// 4. [`UrlProcessor::stop`] or [`UrlProcessor::shutdown`] ends the pool
pub struct UrlProcessor {
    /// `None` once the queue has been closed.
    jobs: Mutex<Option<mpsc::Sender<String>>>,
    results: Mutex<Option<mpsc::Receiver<ProbeResult>>>,
    cancel: CancellationToken,
    tracker: TaskTracker,
    config: ProcessorConfig,
}

impl UrlProcessor {
    /// Spawns the worker pool on the current Tokio runtime.
    ///
    /// Worker count and queue capacity are clamped to at least 1.
    pub fn start(config: ProcessorConfig, prober: Arc<dyn Prober>) -> Self {
        let config = ProcessorConfig {
            workers: config.workers.max(1),
            queue_capacity: config.queue_capacity.max(1),
            ..config
        };

        let (job_tx, job_rx) = mpsc::channel(config.queue_capacity);
        let (result_tx, result_rx) = mpsc::channel(config.queue_capacity);
        let jobs: JobQueue = Arc::new(AsyncMutex::new(job_rx));

        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();

        for id in 0..config.workers {
            let worker = Worker {
                id,
                jobs: jobs.clone(),
                results: result_tx.clone(),
                prober: prober.clone(),
                cancel: cancel.clone(),
                job_timeout: config.job_timeout,
            };
            tracker.spawn(worker.run());
        }
        tracker.close();

        info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "URL processor started"
        );

        Self {
            jobs: Mutex::new(Some(job_tx)),
            results: Mutex::new(Some(result_rx)),
            cancel,
            tracker,
            config,
        }
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> ProcessorConfig {
        self.config
    }

    /// Enqueues a URL, waiting for queue capacity if necessary.
    ///
    /// Returns `false` without blocking once shutdown has been signalled,
    /// and stops waiting if shutdown starts while the queue is full.
    pub async fn submit(&self, url: impl Into<String>) -> bool {
        let Some(sender) = self.job_sender() else {
            return false;
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            sent = sender.send(url.into()) => sent.is_ok(),
        }
    }

    /// Enqueues a URL only if the queue has room. Never waits.
    ///
    /// Returns `false` when the job was dropped because the queue is full or
    /// the processor is stopped.
    pub fn try_submit(&self, url: impl Into<String>) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }

        let jobs = lock(&self.jobs);
        let Some(sender) = jobs.as_ref() else {
            return false;
        };

        match sender.try_send(url.into()) {
            Ok(()) => true,
            Err(TrySendError::Full(url)) => {
                warn!(url = %url, "URL processor queue full, dropping probe job");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Hands out the result stream. Returns `None` after the first call.
    ///
    /// The stream yields one result per processed job and ends when every
    /// worker has exited. Workers block on delivery while the stream is
    /// full, so it must be drained.
    pub fn results(&self) -> Option<mpsc::Receiver<ProbeResult>> {
        lock(&self.results).take()
    }

    /// Cancels every worker and closes the job queue.
    ///
    /// In-flight probes are aborted and their results may be dropped.
    /// Calling this more than once is a logged no-op.
    pub fn stop(&self) {
        self.cancel.cancel();

        if self.close_queue() {
            info!("URL processor stopping");
        } else {
            debug!("URL processor already stopped");
        }
    }

    /// Closes the queue and lets workers finish pending jobs for up to
    /// `grace`, then cancels whatever is still running.
    pub async fn shutdown(&self, grace: Duration) {
        self.close_queue();

        if tokio::time::timeout(grace, self.tracker.wait())
            .await
            .is_err()
        {
            warn!(
                grace_secs = grace.as_secs_f64(),
                "URL processor did not drain in time, cancelling workers"
            );
        }

        self.cancel.cancel();
        self.tracker.wait().await;
        info!("URL processor stopped");
    }

    /// Waits until every worker has exited.
    pub async fn wait(&self) {
        self.tracker.wait().await;
    }

    /// Returns true once the job queue has been closed.
    pub fn is_stopped(&self) -> bool {
        lock(&self.jobs).is_none()
    }

    /// Number of jobs waiting in the queue.
    pub fn queued_jobs(&self) -> usize {
        lock(&self.jobs)
            .as_ref()
            .map_or(0, |sender| sender.max_capacity() - sender.capacity())
    }

    fn job_sender(&self) -> Option<mpsc::Sender<String>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        lock(&self.jobs).clone()
    }

    /// Returns true if this call closed the queue.
    fn close_queue(&self) -> bool {
        lock(&self.jobs).take().is_some()
    }
}

impl Drop for UrlProcessor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Worker {
    id: usize,
    jobs: JobQueue,
    results: mpsc::Sender<ProbeResult>,
    prober: Arc<dyn Prober>,
    cancel: CancellationToken,
    job_timeout: Duration,
}

impl Worker {
    async fn run(self) {
        debug!(worker = self.id, "URL processor worker started");

        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!(worker = self.id, "worker stopping: cancelled");
                    break;
                }
                job = next_job(&self.jobs) => job,
            };

            let Some(url) = next else {
                debug!(worker = self.id, "worker stopping: job queue closed");
                break;
            };

            let result = self.process(url).await;
            let result_url = result.url.clone();

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!(worker = self.id, url = %result_url, "dropping probe result during shutdown");
                    break;
                }
                sent = self.results.send(result) => {
                    if sent.is_err() {
                        debug!(worker = self.id, "result stream dropped");
                        break;
                    }
                }
            }
        }

        debug!(worker = self.id, "URL processor worker exited");
    }

    async fn process(&self, url: String) -> ProbeResult {
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ProbeFailure::Cancelled),
            outcome = tokio::time::timeout(self.job_timeout, self.prober.probe(&url)) => {
                outcome.unwrap_or_else(|_| Err(ProbeFailure::Timeout(self.job_timeout)))
            }
        };

        ProbeResult::from_outcome(url, outcome, started.elapsed())
    }
}

async fn next_job(jobs: &AsyncMutex<mpsc::Receiver<String>>) -> Option<String> {
    jobs.lock().await.recv().await
}

/// Drains the result stream, logging each probe outcome.
///
/// Returns when the stream closes, i.e. once the pool has terminated.
pub async fn run_result_logger(mut results: mpsc::Receiver<ProbeResult>) {
    while let Some(result) = results.recv().await {
        let elapsed_ms = u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX);

        match &result.failure {
            Some(failure) => warn!(
                url = %result.url,
                error = %failure,
                elapsed_ms,
                "URL probe failed"
            ),
            None => info!(
                url = %result.url,
                status = result.status.unwrap_or_default(),
                content_type = %result.content_type,
                elapsed_ms,
                "URL probed"
            ),
        }
    }

    debug!("probe result stream closed");
}
