//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use neko_types::error::OrchestratorError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Unknown session or resource.
    NotFound(String),
    /// Orchestrator rejected the operation.
    Orchestrator(OrchestratorError),
    /// Validation error.
    Validation(String),
}

impl From<OrchestratorError> for AppError {
    fn from(e: OrchestratorError) -> Self {
        AppError::Orchestrator(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Orchestrator(e @ OrchestratorError::RequestPending) => {
                (StatusCode::CONFLICT, "REQUEST_PENDING", e.to_string())
            }
            AppError::Orchestrator(e @ OrchestratorError::InvalidInput) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", e.to_string())
            }
            AppError::Orchestrator(e @ OrchestratorError::InvalidSnapshot(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_SNAPSHOT", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        tracing::debug!(%status, code, "{message}");

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
