//! `bookshelf-core`: the book record model.
//!
//! This crate contains **pure domain** code: the record shape, validation of
//! untrusted input, and the mapping between wire and storage representations.
//! Nothing here performs IO.

pub mod book;
pub mod error;
pub mod id;
pub mod validate;

pub use book::{Book, BookFields, BookPatch};
pub use error::{FieldViolation, ValidationError};
pub use id::BookId;
pub use validate::{validate, validate_patch};
