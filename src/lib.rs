// shelfstore - Local persistence for UI shelves
//
// A shelf is a UI element saved as markup under a caller-chosen integer id.
// Records live in a single `shelves` collection inside an embedded sled
// database (`dataDB`, schema version 1) that is opened on first use.

pub mod shelf;
pub mod storage;

pub use shelf::{Shelf, ShelfElement, ShelfError, ShelfId, ShelfRecord};
pub use storage::{
    MemoryShelfStore, SaveOutcome, SaveRejection, ShelfRepository, ShelfStore, StoreConfig,
    StoreError,
};
