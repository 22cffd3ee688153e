//! Error types for the note service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use note_storage_core::StorageError;

/// Failure outcomes that reach the caller.
///
/// `NotFound` is an expected outcome of get-by-id and is reported distinctly;
/// every storage failure collapses into a generic category at the HTTP
/// boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("note not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: &'static str,
            code: &'static str,
        }

        // Storage detail stays in the server log; the caller sees the
        // category only. Not-found is a normal outcome and is not logged.
        let (status, code, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "note not found"),
            ApiError::Storage(StorageError::Unavailable(reason)) => {
                error!("Storage backend unavailable: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_UNAVAILABLE",
                    "storage backend unavailable",
                )
            }
            ApiError::Storage(StorageError::Serialization(reason)) => {
                error!("Stored note could not be decoded: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal error",
                )
            }
        };

        let body = ErrorBody {
            error: message,
            code,
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
