use axum::Router;

pub mod books;
pub mod system;

/// Router for the book collection.
pub fn router() -> Router {
    Router::new().nest("/books", books::router())
}
