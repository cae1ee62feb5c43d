//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, probe pool startup, and the Axum server lifecycle
//! including graceful shutdown.

use crate::api::middleware::metrics::RequestMetrics;
use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::repositories::UrlStore;
use crate::domain::url_processor::{UrlProcessor, run_result_logger};
use crate::infrastructure::persistence::{InMemoryUrlStore, PgUrlStore};
use crate::infrastructure::probe::HttpProber;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - URL store (PostgreSQL, or in-memory fallback)
/// - HTTP prober and URL processor pool
/// - Probe result consumer
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting connections, the processor
/// drains its queue within the configured grace period, and the result
/// consumer exits once the stream closes.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await;

    let prober = HttpProber::new(config.probe_timeout()).context("Failed to build HTTP client")?;
    let processor = Arc::new(UrlProcessor::start(
        config.processor_config(),
        Arc::new(prober),
    ));

    let consumer = processor
        .results()
        .map(|results| tokio::spawn(run_result_logger(results)));

    let link_service = Arc::new(LinkService::new(
        store,
        Some(processor.clone()),
        config.base_url.clone(),
    ));
    let metrics = Arc::new(RequestMetrics::new());
    let state = AppState::new(link_service, Some(processor.clone()), metrics);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped, draining URL processor");
    processor.shutdown(config.shutdown_grace()).await;

    if let Some(consumer) = consumer
        && let Err(e) = consumer.await
    {
        tracing::warn!("Probe result consumer ended abnormally: {}", e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Picks the store backend.
///
/// A configured but unreachable database is not fatal: the service keeps
/// running on the in-memory store and says so.
async fn build_store(config: &Config) -> Arc<dyn UrlStore> {
    let Some(database_url) = &config.database_url else {
        tracing::info!("No database configured, using in-memory store");
        return Arc::new(InMemoryUrlStore::new());
    };

    match PgUrlStore::connect(database_url, &config.pool_settings()).await {
        Ok(store) => {
            tracing::info!("Using PostgreSQL store");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("{}. Falling back to in-memory store.", e);
            Arc::new(InMemoryUrlStore::new())
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
