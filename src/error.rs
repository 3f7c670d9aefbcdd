// Error taxonomy and HTTP mapping

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

/// Client-caused submission problems. Always 400, never retried.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid data format: {field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
    #[error("Invalid data format: {0}")]
    InvalidBody(String),
}

/// Dataset file problems. Treated as server faults.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("dataset file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("dataset header missing or malformed: {}", .0.display())]
    MalformedHeader(PathBuf),
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Endpoint-boundary error for the JSON routes.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Body could not be buffered (too large, aborted); keeps the rejection's own status.
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),
    #[error("{0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {err}"))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Validation(e) => tracing::debug!("Rejected submission: {}", e),
            ApiError::Body(e) => tracing::debug!("Rejected request body: {}", e.body_text()),
            other => tracing::error!("Request failed: {}", other),
        }
        (
            status,
            Json(serde_json::json!({ "status": "error", "message": self.to_string() })),
        )
            .into_response()
    }
}
