/// Error types for Post Service
///
/// Every failure leaves the process running: errors are converted into an HTTP status
/// plus a `{message}` JSON body.
use crate::db::StoreError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use post_common::{models::MSG_NOT_FOUND, ErrorBody};
use thiserror::Error;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Target id absent on get/update/delete
    #[error("{}", MSG_NOT_FOUND)]
    NotFound,

    /// Reading or writing the persisted sequence failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Missing, empty, or unexpected request fields
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        HttpResponse::build(status).json(ErrorBody {
            message: self.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::MalformedRequest(err.to_string())
    }
}
