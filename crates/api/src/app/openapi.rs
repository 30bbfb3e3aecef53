//! OpenAPI document and the interactive viewers that render it.

use axum::Router;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use bookshelf_core::{Book, BookFields, BookPatch, FieldViolation};

use crate::app::dto::{ErrorResponse, MessageResponse, ValidationErrorResponse};
use crate::app::routes::books;

pub const SPEC_PATH: &str = "/api/v1/openapi.json";
pub const SWAGGER_PATH: &str = "/api/v1/docs";
pub const REDOC_PATH: &str = "/api/v1/redoc";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Books API",
        description = "A simple CRUD API for managing books",
        version = "1.0.0"
    ),
    paths(
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(schemas(
        Book,
        BookFields,
        BookPatch,
        FieldViolation,
        MessageResponse,
        ErrorResponse,
        ValidationErrorResponse,
    )),
    tags((name = "books", description = "Book records"))
)]
pub struct ApiDoc;

/// Serves the JSON document plus Swagger UI and ReDoc pages.
pub fn router() -> Router {
    Router::new()
        .merge(SwaggerUi::new(SWAGGER_PATH).url(SPEC_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url(REDOC_PATH, ApiDoc::openapi()))
}
