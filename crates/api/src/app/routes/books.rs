use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use futures_util::TryStreamExt;

use bookshelf_core::{Book, BookFields, BookId, BookPatch};

use crate::app::dto::{self, ErrorResponse, MessageResponse, ValidationErrorResponse};
use crate::app::errors;
use crate::app::services::SharedStore;

const NOT_FOUND: &str = "Book not found";
const UPDATE_FAILED: &str = "Failed to update book";
const DELETE_FAILED: &str = "Failed to delete book";
const LIST_FAILED: &str = "Failed to list books";
const CREATE_FAILED: &str = "Failed to create book";
const DELETED: &str = "Book deleted successfully";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

/// List every stored book.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in storage order", body = [Book]),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_books(Extension(store): Extension<SharedStore>) -> axum::response::Response {
    let stream = match store.list_all().await {
        Ok(s) => s,
        Err(e) => return errors::store_error_to_response(e, LIST_FAILED),
    };

    match stream.try_collect::<Vec<Book>>().await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => errors::store_error_to_response(e, LIST_FAILED),
    }
}

/// Fetch one book by id.
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "24-character hex book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No book with this id", body = ErrorResponse),
    )
)]
pub async fn get_book(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match store.get_by_id(&BookId::new(id)).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => errors::store_error_to_response(e, NOT_FOUND),
    }
}

/// Create a book; the id is assigned by storage.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookFields,
    responses(
        (status = 200, description = "The created book", body = Book),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ValidationErrorResponse),
    )
)]
pub async fn create_book(
    Extension(store): Extension<SharedStore>,
    body: Bytes,
) -> axum::response::Response {
    let input = match dto::parse_json_body(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let fields = match bookshelf_core::validate(&input) {
        Ok(f) => f,
        Err(e) => return errors::validation_error_to_response(e),
    };

    match store.create(fields).await {
        Ok(book) => {
            tracing::info!(book_id = %book.id, "book created");
            (StatusCode::OK, Json(book)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, CREATE_FAILED),
    }
}

/// Partially update a book. An empty body returns the current record.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "24-character hex book id")),
    request_body = BookPatch,
    responses(
        (status = 200, description = "The resulting book", body = Book),
        (status = 400, description = "Malformed id or JSON", body = ErrorResponse),
        (status = 404, description = "No book with this id", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ValidationErrorResponse),
    )
)]
pub async fn update_book(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let input = match dto::parse_json_body(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let patch = match bookshelf_core::validate_patch(&input) {
        Ok(p) => p,
        Err(e) => return errors::validation_error_to_response(e),
    };

    let id = BookId::new(id);
    match store.update(&id, patch).await {
        Ok(outcome) => {
            tracing::info!(book_id = %id, noop = outcome.is_noop(), "book updated");
            (StatusCode::OK, Json(outcome.into_book())).into_response()
        }
        Err(e) => errors::store_error_to_response(e, UPDATE_FAILED),
    }
}

/// Delete a book.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "24-character hex book id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No book with this id", body = ErrorResponse),
    )
)]
pub async fn delete_book(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = BookId::new(id);
    match store.delete(&id).await {
        Ok(()) => {
            tracing::info!(book_id = %id, "book deleted");
            (StatusCode::OK, Json(MessageResponse::new(DELETED))).into_response()
        }
        Err(e) => errors::store_error_to_response(e, DELETE_FAILED),
    }
}
