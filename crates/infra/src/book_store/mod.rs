//! Persistence gateway for the book collection.
//!
//! `BookStore` is the only component that talks to the document database.
//! Identifiers cross this boundary as opaque strings and are converted to
//! the engine's native `ObjectId` here; every implementation shares that
//! conversion so malformed ids behave the same everywhere.

pub mod in_memory;
pub mod mongo;
pub mod r#trait;

pub use in_memory::InMemoryBookStore;
pub use mongo::{BookDocument, MongoBookStore};
pub use r#trait::{BookStore, BookStream, StoreError, UpdateOutcome};

use bookshelf_core::BookId;
use mongodb::bson::oid::ObjectId;

/// Convert an opaque id into the engine's native identifier.
pub fn parse_object_id(id: &BookId) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.as_str()).map_err(|e| StoreError::InvalidId(format!("{id}: {e}")))
}

/// Render a native identifier as the opaque wire id.
pub fn book_id(oid: ObjectId) -> BookId {
    BookId::new(oid.to_hex())
}
