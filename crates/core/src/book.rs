use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::id::BookId;

/// Storage body of a book: everything except the identifier.
///
/// This is exactly what gets written to the collection; the engine keeps the
/// identifier as its own document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub year: i64,
}

/// Wire representation of a stored book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    #[schema(value_type = String, example = "65f0c0ffee0000000000beef")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl Book {
    /// Attach the engine-assigned identifier to a stored body.
    pub fn from_storage_document(fields: BookFields, id: BookId) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            year: fields.year,
        }
    }

    /// Body to persist; the identifier is dropped.
    pub fn to_storage_body(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
        }
    }
}

/// Sparse update: `None` means "leave as is", never "reset".
///
/// Serializes only the supplied fields, so the result can be used directly
/// as a `$set` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }

    /// Overwrite the supplied fields, leaving the rest untouched.
    pub fn apply_to(&self, fields: &mut BookFields) {
        if let Some(title) = &self.title {
            fields.title.clone_from(title);
        }
        if let Some(author) = &self.author {
            fields.author.clone_from(author);
        }
        if let Some(year) = self.year {
            fields.year = year;
        }
    }
}
