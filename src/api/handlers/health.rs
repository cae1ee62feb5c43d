//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Counts stored entries
/// 2. **Processor**: Reports worker count and queue depth, or that probing is disabled
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "42 URLs stored" },
///     "processor": { "status": "ok", "message": "4 workers, 0 queued" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let processor_check = check_processor(&state);

    let all_healthy = store_check.is_ok() && processor_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            processor: processor_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.link_service.count().await {
        Ok(count) => CheckStatus::ok(format!("{count} URLs stored")),
        Err(e) => CheckStatus::error(format!("Store error: {e}")),
    }
}

fn check_processor(state: &AppState) -> CheckStatus {
    let Some(processor) = &state.processor else {
        return CheckStatus::ok("Probing disabled");
    };

    if processor.is_stopped() {
        CheckStatus::error("URL processor is stopped")
    } else {
        CheckStatus::ok(format!(
            "{} workers, {} queued",
            processor.config().workers,
            processor.queued_jobs()
        ))
    }
}
