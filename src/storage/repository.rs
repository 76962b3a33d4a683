// ShelfRepository - The five shelf operations as a trait
// Lets callers swap the sled-backed store for an in-memory one in tests

use crate::shelf::{Shelf, ShelfId, ShelfRecord};
use crate::storage::{ShelfStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, error};

// ============================================================================
// SAVE OUTCOME
// ============================================================================

/// Why a save was skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveRejection {
    /// The element to save was absent
    MissingElement { id: ShelfId },
}

/// Result of a save that did not fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: ShelfId },
    Rejected(SaveRejection),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

/// Log and build the outcome for a save with no element
pub(crate) fn reject_missing(id: ShelfId) -> SaveOutcome {
    error!(id, "one of the shelves is null, nothing saved");
    SaveOutcome::Rejected(SaveRejection::MissingElement { id })
}

// ============================================================================
// REPOSITORY TRAIT
// ============================================================================

/// Storage for shelf records keyed by id
#[async_trait]
pub trait ShelfRepository: Send + Sync {
    /// Upsert `contents` under `id`; `None` is rejected without writing
    async fn save(&self, contents: Option<&Shelf>, id: ShelfId) -> Result<SaveOutcome, StoreError>;

    /// Get the record for `id`; absence is `Ok(None)`
    async fn get(&self, id: ShelfId) -> Result<Option<ShelfRecord>, StoreError>;

    /// Snapshot of all records in ascending id order
    async fn get_all(&self) -> Result<Vec<ShelfRecord>, StoreError>;

    /// Remove the record for `id` if present
    async fn delete(&self, id: ShelfId) -> Result<(), StoreError>;

    /// Remove every record
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl ShelfRepository for ShelfStore {
    async fn save(&self, contents: Option<&Shelf>, id: ShelfId) -> Result<SaveOutcome, StoreError> {
        ShelfStore::save(self, contents, id).await
    }

    async fn get(&self, id: ShelfId) -> Result<Option<ShelfRecord>, StoreError> {
        ShelfStore::get(self, id).await
    }

    async fn get_all(&self) -> Result<Vec<ShelfRecord>, StoreError> {
        ShelfStore::get_all(self).await
    }

    async fn delete(&self, id: ShelfId) -> Result<(), StoreError> {
        ShelfStore::delete(self, id).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        ShelfStore::clear(self).await
    }
}

// ============================================================================
// IN-MEMORY REPOSITORY
// ============================================================================

/// In-memory implementation of ShelfRepository for testing
#[derive(Default)]
pub struct MemoryShelfStore {
    shelves: RwLock<BTreeMap<ShelfId, Shelf>>,
}

impl MemoryShelfStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.shelves.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shelves.read().await.is_empty()
    }
}

#[async_trait]
impl ShelfRepository for MemoryShelfStore {
    async fn save(&self, contents: Option<&Shelf>, id: ShelfId) -> Result<SaveOutcome, StoreError> {
        let Some(contents) = contents else {
            return Ok(reject_missing(id));
        };
        debug!(id, "saving shelf in memory");
        self.shelves.write().await.insert(id, contents.clone());
        Ok(SaveOutcome::Saved { id })
    }

    async fn get(&self, id: ShelfId) -> Result<Option<ShelfRecord>, StoreError> {
        Ok(self
            .shelves
            .read()
            .await
            .get(&id)
            .map(|shelf| ShelfRecord::new(id, shelf.clone())))
    }

    async fn get_all(&self) -> Result<Vec<ShelfRecord>, StoreError> {
        Ok(self
            .shelves
            .read()
            .await
            .iter()
            .map(|(id, shelf)| ShelfRecord::new(*id, shelf.clone()))
            .collect())
    }

    async fn delete(&self, id: ShelfId) -> Result<(), StoreError> {
        self.shelves.write().await.remove(&id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.shelves.write().await.clear();
        Ok(())
    }
}
