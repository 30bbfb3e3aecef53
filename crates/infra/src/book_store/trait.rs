use std::sync::Arc;

use bookshelf_core::{Book, BookFields, BookId, BookPatch};
use futures_util::stream::BoxStream;
use thiserror::Error;

/// Lazy sequence over the collection; each `list_all` call starts a new one.
pub type BookStream = BoxStream<'static, Result<Book, StoreError>>;

/// Book store operation error.
///
/// `InvalidId` and `NotFound` are expected per-request outcomes; `Backend`
/// covers everything the driver can throw at us (network, auth, decoding).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid book id: {0}")]
    InvalidId(String),

    #[error("book not found")]
    NotFound,

    #[error("storage backend failure in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn backend(operation: &'static str, err: impl core::fmt::Display) -> Self {
        Self::Backend {
            operation,
            message: err.to_string(),
        }
    }
}

/// Result of `BookStore::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The patch was written; carries the post-update record (which may equal
    /// the previous one when the supplied values were already stored).
    Applied(Book),
    /// Empty patch: nothing was written; carries the current record.
    NoOp(Book),
}

impl UpdateOutcome {
    pub fn into_book(self) -> Book {
        match self {
            Self::Applied(book) | Self::NoOp(book) => book,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp(_))
    }
}

/// CRUD gateway over the single book collection.
///
/// Each method is one round trip to the database. Implementations hold no
/// per-request state and must be safe to share across tasks.
#[async_trait::async_trait]
pub trait BookStore: Send + Sync {
    /// Full scan in natural storage order.
    async fn list_all(&self) -> Result<BookStream, StoreError>;

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError>;

    /// Insert a new record; the engine mints the identifier.
    async fn create(&self, fields: BookFields) -> Result<Book, StoreError>;

    /// Apply the supplied fields only.
    ///
    /// An empty patch issues no write and returns the current record.
    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<UpdateOutcome, StoreError>;

    /// Remove one record; `NotFound` when nothing was deleted.
    async fn delete(&self, id: &BookId) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> BookStore for Arc<S>
where
    S: BookStore + ?Sized,
{
    async fn list_all(&self) -> Result<BookStream, StoreError> {
        (**self).list_all().await
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, fields: BookFields) -> Result<Book, StoreError> {
        (**self).create(fields).await
    }

    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<UpdateOutcome, StoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &BookId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
