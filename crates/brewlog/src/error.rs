use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::logs::LogError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convenience type alias
pub type ApiResult<T> = Result<T, ApiError>;

impl From<LogError> for ApiError {
    fn from(err: LogError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Internal errors are sanitized to avoid leaking filesystem details.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            ApiError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            ApiError::Internal(detail) => {
                // Full detail stays in the server log
                tracing::error!("Internal error: {}", detail);
                ("INTERNAL_SERVER_ERROR", "An internal error occurred".to_string())
            }
        };

        (
            self.status(),
            Json(json!({
                "error": message,
                "code": code,
            })),
        )
            .into_response()
    }
}
