// Shelf module - The persisted unit
// A shelf is a UI element captured as markup, stored under a caller-chosen id

mod model;
mod element;
mod codec;

pub use model::*;
pub use element::*;
pub use codec::*;
