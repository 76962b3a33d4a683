// ShelfElement - Conversion between live UI values and stored markup

use crate::shelf::Shelf;
use thiserror::Error;

/// Errors rebuilding an element from stored markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShelfError {
    #[error("Shelf markup is empty")]
    EmptyMarkup,

    #[error("Invalid shelf markup: {0}")]
    InvalidMarkup(String),
}

/// A UI element that can be persisted as a shelf
///
/// `to_markup` must produce text that `from_markup` accepts, so that a saved
/// element reads back as an equivalent one.
pub trait ShelfElement {
    /// Serialize the element (its outer HTML, for DOM-like values)
    fn to_markup(&self) -> String;

    /// Reconstruct the element from previously serialized markup
    fn from_markup(markup: &str) -> Result<Self, ShelfError>
    where
        Self: Sized;
}

impl ShelfElement for Shelf {
    fn to_markup(&self) -> String {
        self.markup().to_string()
    }

    fn from_markup(markup: &str) -> Result<Self, ShelfError> {
        Ok(Shelf::from_markup(markup))
    }
}

impl ShelfElement for String {
    fn to_markup(&self) -> String {
        self.clone()
    }

    fn from_markup(markup: &str) -> Result<Self, ShelfError> {
        Ok(markup.to_string())
    }
}
