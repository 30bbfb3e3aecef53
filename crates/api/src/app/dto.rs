use axum::body::Bytes;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use bookshelf_core::FieldViolation;

use crate::app::errors;

/// `{"message": ...}` payload used by the liveness probe and delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(value_type = String, example = "Book deleted successfully")]
    pub message: &'static str,
}

/// Body of every non-validation error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(value_type = String, example = "not_found")]
    pub error: &'static str,
    #[schema(example = "Book not found")]
    pub message: String,
}

/// 422 body: the summary plus one entry per rejected field.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(value_type = String, example = "validation_error")]
    pub error: &'static str,
    pub message: String,
    pub fields: Vec<FieldViolation>,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Parse a request body as JSON.
///
/// An empty (or all-whitespace) body is read as `{}` so an update without a
/// payload behaves like an empty patch. Shape checks are left to the record
/// model so that every offending field can be reported at once.
pub fn parse_json_body(body: &Bytes) -> Result<Value, axum::response::Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_json", format!("invalid JSON body: {e}"))
    })
}
