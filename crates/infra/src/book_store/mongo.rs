//! MongoDB-backed book store.
//!
//! Records live in a single collection. The document body is exactly
//! `BookFields`; the identifier is MongoDB's own `_id` and never stored as a
//! separate field.
//!
//! ## Error mapping
//!
//! | Situation | StoreError |
//! |-----------|------------|
//! | id is not a 24-char hex ObjectId | `InvalidId` |
//! | `find_one` / `find_one_and_update` returned nothing | `NotFound` |
//! | `delete_one` removed zero documents | `NotFound` |
//! | any driver error (network, auth, decode) | `Backend` |
//!
//! `InvalidId` and `NotFound` are ordinary request outcomes, so the
//! per-id operations record their errors at DEBUG. Callers decide how loudly
//! to report `Backend`.
//!
//! ## Thread Safety
//!
//! `mongodb::Client` is internally pooled and cheap to clone, so the store is
//! `Clone + Send + Sync` and shared across handlers without locking.

use bookshelf_core::{Book, BookFields, BookId, BookPatch};
use futures_util::{StreamExt, TryStreamExt};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::r#trait::{BookStore, BookStream, StoreError, UpdateOutcome};
use super::{book_id, parse_object_id};

/// Stored document as read back from the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl BookDocument {
    pub fn into_book(self) -> Book {
        let fields = BookFields {
            title: self.title,
            author: self.author,
            year: self.year,
        };
        Book::from_storage_document(fields, book_id(self.id))
    }
}

#[derive(Debug, Clone)]
pub struct MongoBookStore {
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    pub fn new(collection: Collection<BookDocument>) -> Self {
        Self { collection }
    }

    /// Connect once and verify the deployment answers a `ping`.
    ///
    /// The returned store owns the only client for the process.
    #[instrument(skip(uri), err)]
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::backend("connect", e))?;

        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::backend("ping", e))?;

        tracing::info!(database, collection, "connected to mongodb");
        Ok(Self::new(db.collection(collection)))
    }

    pub fn collection(&self) -> &Collection<BookDocument> {
        &self.collection
    }
}

#[async_trait::async_trait]
impl BookStore for MongoBookStore {
    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<BookStream, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::backend("list_all", e))?;

        Ok(cursor
            .map_ok(BookDocument::into_book)
            .map_err(|e| StoreError::backend("list_all", e))
            .boxed())
    }

    #[instrument(skip(self), fields(book_id = %id), err(level = "debug"))]
    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        let oid = parse_object_id(id)?;
        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| StoreError::backend("get_by_id", e))?
            .map(BookDocument::into_book)
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self, fields), err)]
    async fn create(&self, fields: BookFields) -> Result<Book, StoreError> {
        let result = self
            .collection
            .clone_with_type::<BookFields>()
            .insert_one(&fields)
            .await
            .map_err(|e| StoreError::backend("create", e))?;

        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::backend("create", "inserted _id is not an ObjectId"))?;

        Ok(Book::from_storage_document(fields, book_id(oid)))
    }

    #[instrument(skip(self, patch), fields(book_id = %id), err(level = "debug"))]
    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<UpdateOutcome, StoreError> {
        if patch.is_empty() {
            return self.get_by_id(id).await.map(UpdateOutcome::NoOp);
        }

        let oid = parse_object_id(id)?;
        let set = mongodb::bson::to_document(&patch).map_err(|e| StoreError::backend("update", e))?;

        // find-and-modify reports a match even when no value changes, unlike
        // `modified_count`, so "unchanged" is never mistaken for "missing".
        self.collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError::backend("update", e))?
            .map(|doc| UpdateOutcome::Applied(doc.into_book()))
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self), fields(book_id = %id), err(level = "debug"))]
    async fn delete(&self, id: &BookId) -> Result<(), StoreError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| StoreError::backend("delete", e))?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
