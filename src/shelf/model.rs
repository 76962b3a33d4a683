use crate::shelf::{ShelfElement, ShelfError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen primary key of a shelf record
///
/// Any value is accepted, including zero and negatives.
pub type ShelfId = i64;

/// Serialized contents of one UI element
///
/// Holds the element's markup (e.g. its outer HTML). Live handles are never
/// stored; they are rebuilt from this text on read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shelf(String);

impl Shelf {
    /// Wrap already-serialized markup
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Capture an element by serializing it
    pub fn capture<E: ShelfElement>(element: &E) -> Self {
        Self(element.to_markup())
    }

    /// Rebuild a typed element from the stored markup
    pub fn restore<E: ShelfElement>(&self) -> Result<E, ShelfError> {
        E::from_markup(&self.0)
    }

    /// Get the markup
    pub fn markup(&self) -> &str {
        &self.0
    }

    /// Consume and return the markup
    pub fn into_markup(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Shelf {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

impl From<&str> for Shelf {
    fn from(markup: &str) -> Self {
        Self(markup.to_string())
    }
}

/// The persisted `{id, contents}` pair for one shelf
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfRecord {
    id: ShelfId,
    contents: Shelf,
}

impl ShelfRecord {
    pub fn new(id: ShelfId, contents: Shelf) -> Self {
        Self { id, contents }
    }

    /// Get the record id
    pub fn id(&self) -> ShelfId {
        self.id
    }

    /// Get the serialized contents
    pub fn contents(&self) -> &Shelf {
        &self.contents
    }

    /// Rebuild the element this record was saved from
    pub fn restore<E: ShelfElement>(&self) -> Result<E, ShelfError> {
        self.contents.restore()
    }

    pub fn into_contents(self) -> Shelf {
        self.contents
    }
}
