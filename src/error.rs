//! HTTP-facing error type.
//!
//! Every error leaving a handler is rendered as
//! `{"error": {"code": ..., "message": ..., "details": ...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidInput => AppError::bad_request("URL must not be empty", json!({})),
            StoreError::InvalidAlias => AppError::bad_request(
                "Alias must be 3-20 ASCII letters or digits",
                json!({ "field": "alias" }),
            ),
            StoreError::AliasInUse => AppError::conflict("Alias is already in use", json!({})),
            StoreError::NotFound => AppError::not_found("Short URL not found", json!({})),
            other => {
                tracing::error!(error = %other, "Store operation failed");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_statuses() {
        let cases = [
            (StoreError::InvalidInput, StatusCode::BAD_REQUEST),
            (StoreError::InvalidAlias, StatusCode::BAD_REQUEST),
            (StoreError::AliasInUse, StatusCode::CONFLICT),
            (StoreError::NotFound, StatusCode::NOT_FOUND),
            (
                StoreError::BackendUnavailable("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (store_error, expected) in cases {
            assert_eq!(AppError::from(store_error).status(), expected);
        }
    }

    #[test]
    fn test_internal_errors_hide_backend_detail() {
        let err = AppError::from(StoreError::BackendUnavailable("password=hunter2".to_string()));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = AppError::conflict("taken", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
