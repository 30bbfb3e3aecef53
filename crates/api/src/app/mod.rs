//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `services.rs`: store selection (MongoDB or in-memory)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request body parsing and small response payloads
//! - `errors.rs`: consistent error responses
//! - `openapi.rs`: OpenAPI document, Swagger UI and ReDoc

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod services;

pub use services::SharedStore;

/// Build the full HTTP router around an already-connected store.
pub fn build_app(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(routes::system::root))
        .merge(routes::router())
        .merge(openapi::router())
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_context))
                .layer(Extension(store)),
        )
}
