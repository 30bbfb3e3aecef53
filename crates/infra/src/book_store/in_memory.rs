use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use bookshelf_core::{Book, BookFields, BookId, BookPatch};
use futures_util::StreamExt;
use futures_util::stream;
use mongodb::bson::oid::ObjectId;

use super::r#trait::{BookStore, BookStream, StoreError, UpdateOutcome};
use super::{book_id, parse_object_id};

/// In-memory book collection.
///
/// Intended for tests/dev. Identifiers are real `ObjectId`s so id parsing
/// and ordering match the MongoDB store.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    docs: RwLock<BTreeMap<ObjectId, BookFields>>,
    writes: AtomicU64,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write operations (insert/update/delete) issued so far.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

fn poisoned(operation: &'static str) -> StoreError {
    StoreError::backend(operation, "lock poisoned")
}

#[async_trait::async_trait]
impl BookStore for InMemoryBookStore {
    async fn list_all(&self) -> Result<BookStream, StoreError> {
        let docs = self.docs.read().map_err(|_| poisoned("list_all"))?;
        let snapshot: Vec<Result<Book, StoreError>> = docs
            .iter()
            .map(|(oid, fields)| Ok(Book::from_storage_document(fields.clone(), book_id(*oid))))
            .collect();
        Ok(stream::iter(snapshot).boxed())
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        let oid = parse_object_id(id)?;
        let docs = self.docs.read().map_err(|_| poisoned("get_by_id"))?;
        docs.get(&oid)
            .map(|fields| Book::from_storage_document(fields.clone(), book_id(oid)))
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, fields: BookFields) -> Result<Book, StoreError> {
        let oid = ObjectId::new();
        let mut docs = self.docs.write().map_err(|_| poisoned("create"))?;
        docs.insert(oid, fields.clone());
        self.record_write();
        Ok(Book::from_storage_document(fields, book_id(oid)))
    }

    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<UpdateOutcome, StoreError> {
        if patch.is_empty() {
            return self.get_by_id(id).await.map(UpdateOutcome::NoOp);
        }

        let oid = parse_object_id(id)?;
        let mut docs = self.docs.write().map_err(|_| poisoned("update"))?;
        let fields = docs.get_mut(&oid).ok_or(StoreError::NotFound)?;
        patch.apply_to(fields);
        self.record_write();
        Ok(UpdateOutcome::Applied(Book::from_storage_document(
            fields.clone(),
            book_id(oid),
        )))
    }

    async fn delete(&self, id: &BookId) -> Result<(), StoreError> {
        let oid = parse_object_id(id)?;
        let mut docs = self.docs.write().map_err(|_| poisoned("delete"))?;
        self.record_write();
        docs.remove(&oid).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
