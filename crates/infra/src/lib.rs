//! Infrastructure layer: the document database and its in-memory stand-in.

pub mod book_store;

pub use book_store::{BookStore, BookStream, InMemoryBookStore, MongoBookStore, StoreError, UpdateOutcome};
