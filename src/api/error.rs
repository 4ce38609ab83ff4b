//! API Error Types
//!
//! Every handler error becomes a JSON body with a stable `code`, a
//! human-readable `message` and a request id that also appears in the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::map::MapError;

/// Errors returned by route handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Map model could not be built
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// Built-in data failed validation
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `{ error: { code, message }, request_id }`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Map(MapError::MissingCategoryColor(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_CATEGORY_COLOR")
            }
            ApiError::Map(MapError::TileOutOfRange { .. } | MapError::ZoomOutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, "TILE_OUT_OF_RANGE")
            }
            ApiError::Map(_) => (StatusCode::INTERNAL_SERVER_ERROR, "MAP_ERROR"),
            ApiError::Catalog(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CATALOG_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
