use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::results::repository::ResultRepository;
use crate::stats::ScoringConfig;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub result_repository: Arc<dyn ResultRepository>,
    pub scoring: ScoringConfig,
}

impl AppState {
    pub fn new(result_repository: Arc<dyn ResultRepository>, scoring: ScoringConfig) -> Self {
        Self {
            result_repository,
            scoring,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// The persistence backend could not complete an operation. Ingestion is
    /// idempotent, so the caller may safely redeliver the event.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A record failed internal consistency checks; the store refuses to
    /// persist it. Indicates a bug, not bad user input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::StorageUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Storage unavailable: {}", msg),
            ),
            AppError::InvariantViolation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Invariant violation: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
