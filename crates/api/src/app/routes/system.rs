use axum::http::StatusCode;
use axum::{Json, response::Response};

use crate::app::dto::MessageResponse;
use crate::app::errors;

/// Liveness probe.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello, World!"))
}

/// Fallback for any path no route matches (including `/books/`).
pub async fn not_found() -> Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "Resource not found")
}
