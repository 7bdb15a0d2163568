use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::SinkError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body was rejected before any document work started.
    #[error("{0}")]
    InputInvalid(String),

    #[error("Error generating CV: {0}")]
    Rendering(String),

    #[error("Error generating CV: {0}")]
    Sink(#[from] SinkError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InputInvalid(_) => StatusCode::BAD_REQUEST,
            AppError::Rendering(_) | AppError::Sink(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::InputInvalid(msg) => tracing::warn!("Rejected request: {msg}"),
            AppError::Rendering(msg) => tracing::error!("Rendering error: {msg}"),
            AppError::Sink(e) => tracing::error!("Document sink error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_invalid_is_400_with_plain_message() {
        let err = AppError::InputInvalid("Invalid JSON data".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid JSON data");
    }

    #[test]
    fn test_failures_after_admission_are_500() {
        let sink = AppError::from(SinkError::DuplicatePart("word/document.xml".into()));
        assert_eq!(sink.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(sink.to_string().contains("word/document.xml"));

        let render = AppError::Rendering("worker panicked".into());
        assert_eq!(render.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(render.to_string(), "Error generating CV: worker panicked");
    }
}
