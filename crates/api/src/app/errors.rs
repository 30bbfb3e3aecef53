use axum::http::StatusCode;
use axum::response::IntoResponse;

use bookshelf_core::ValidationError;
use bookshelf_infra::StoreError;

use crate::app::dto::{ErrorResponse, ValidationErrorResponse};

pub const INVALID_ID_MESSAGE: &str = "Invalid book id";

/// Map a store failure to a response.
///
/// `not_found` is the route-specific message ("Book not found", "Failed to
/// update book", ...).
pub fn store_error_to_response(err: StoreError, not_found: &'static str) -> axum::response::Response {
    match err {
        StoreError::InvalidId(detail) => {
            tracing::debug!(%detail, "rejected malformed book id");
            json_error(StatusCode::BAD_REQUEST, "invalid_id", INVALID_ID_MESSAGE)
        }
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", not_found),
        e @ StoreError::Backend { .. } => {
            tracing::error!(error = %e, "book store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn validation_error_to_response(err: ValidationError) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(ValidationErrorResponse {
            error: "validation_error",
            message: err.to_string(),
            fields: err.violations().to_vec(),
        }),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(ErrorResponse {
            error: code,
            message: message.into(),
        }),
    )
        .into_response()
}
