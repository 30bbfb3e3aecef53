//! Book identifier.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a stored book.
///
/// The domain never interprets the contents; the store converts it to and
/// from its native document id (and reports `InvalidId` when it can't).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BookId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
