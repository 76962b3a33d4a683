// ShelfStore - Lazily connected persistent store for shelves
//
// Every operation re-acquires the shared connection; the first one opens the
// database and creates the collection. sled calls run on the blocking pool.

use crate::shelf::{CodecError, RecordCodec, Shelf, ShelfElement, ShelfId, ShelfRecord};
use crate::storage::connection::{self, Connection};
use crate::storage::repository::{reject_missing, SaveOutcome};
use crate::storage::StoreConfig;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persistent storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Schema version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Database operation failed: {0}")]
    DatabaseError(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),

    #[error("Storage task failed: {0}")]
    TaskFailed(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

impl From<CodecError> for StoreError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::EncodeError(msg) => StoreError::SerializationFailed(msg),
            other => StoreError::DeserializationFailed(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::TaskFailed(err.to_string())
    }
}

/// Statistics about the storage
#[derive(Clone, Debug)]
pub struct StorageStats {
    /// Number of shelf records
    pub record_count: usize,
    /// Approximate disk size in bytes
    pub disk_size_bytes: u64,
}

/// Persistent store for shelf records
///
/// Uses sled for crash-safe, embedded storage. Nothing touches the disk until
/// the first operation runs. Any number of stores may point at the same
/// directory within a process; they share one open database.
pub struct ShelfStore {
    config: StoreConfig,
    conn: OnceCell<Connection>,
}

impl ShelfStore {
    /// Create a store that will open the database on first use
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether the database has been opened yet
    pub fn is_connected(&self) -> bool {
        self.conn.initialized()
    }

    /// Ensure the database is open, returning the shared connection
    async fn connect(&self) -> Result<&Connection, StoreError> {
        self.conn
            .get_or_try_init(|| async {
                let config = self.config.clone();
                tokio::task::spawn_blocking(move || connection::open(&config)).await?
            })
            .await
    }

    /// Run a blocking closure against the collection
    async fn with_shelves<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&sled::Tree) -> Result<T, StoreError> + Send + 'static,
    {
        let shelves = self.connect().await?.shelves.clone();
        tokio::task::spawn_blocking(move || f(&shelves)).await?
    }

    // ========================================================================
    // SHELF OPERATIONS
    // ========================================================================

    /// Save an element under `id`, replacing any previous record
    ///
    /// A `None` element is rejected without writing and without raising: the
    /// rejection is logged and returned as [`SaveOutcome::Rejected`].
    pub async fn save<E: ShelfElement>(
        &self,
        element: Option<&E>,
        id: ShelfId,
    ) -> Result<SaveOutcome, StoreError> {
        let Some(element) = element else {
            return Ok(reject_missing(id));
        };

        let record = ShelfRecord::new(id, Shelf::capture(element));
        let value = RecordCodec::encode(&record)?;
        let durable = self.config.durable_writes;
        debug!(id, bytes = value.len(), "saving shelf");

        self.with_shelves(move |shelves| {
            shelves.insert(RecordCodec::encode_key(id), value)?;
            if durable {
                shelves
                    .flush()
                    .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
            }
            Ok(())
        })
        .await?;

        Ok(SaveOutcome::Saved { id })
    }

    /// Get the record for `id`, or `None` if there is none
    pub async fn get(&self, id: ShelfId) -> Result<Option<ShelfRecord>, StoreError> {
        debug!(id, "loading shelf");
        self.with_shelves(move |shelves| match shelves.get(RecordCodec::encode_key(id))? {
            Some(bytes) => Ok(Some(RecordCodec::decode(&bytes)?)),
            None => Ok(None),
        })
        .await
    }

    /// Snapshot of every record, in ascending id order
    pub async fn get_all(&self) -> Result<Vec<ShelfRecord>, StoreError> {
        self.with_shelves(|shelves| {
            let mut records = Vec::new();
            for result in shelves.iter() {
                let (key, bytes) = result?;
                let record = RecordCodec::decode(&bytes)?;
                let key_id = RecordCodec::decode_key(&key)?;
                if key_id != record.id() {
                    return Err(StoreError::DeserializationFailed(format!(
                        "record {} stored under key {}",
                        record.id(),
                        key_id
                    )));
                }
                records.push(record);
            }
            debug!(count = records.len(), "loaded all shelves");
            Ok(records)
        })
        .await
    }

    /// Remove the record for `id`; absent ids are ignored
    pub async fn delete(&self, id: ShelfId) -> Result<(), StoreError> {
        let durable = self.config.durable_writes;
        self.with_shelves(move |shelves| {
            let removed = shelves.remove(RecordCodec::encode_key(id))?;
            debug!(id, existed = removed.is_some(), "deleted shelf");
            if durable && removed.is_some() {
                shelves
                    .flush()
                    .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
            }
            Ok(())
        })
        .await
    }

    /// Remove every record
    pub async fn clear(&self) -> Result<(), StoreError> {
        let durable = self.config.durable_writes;
        self.with_shelves(move |shelves| {
            shelves.clear()?;
            debug!("cleared shelves");
            if durable {
                shelves
                    .flush()
                    .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
            }
            Ok(())
        })
        .await
    }

    // ========================================================================
    // MAINTENANCE
    // ========================================================================

    /// Number of records
    pub async fn count(&self) -> Result<usize, StoreError> {
        self.with_shelves(|shelves| Ok(shelves.len())).await
    }

    /// Flush all pending writes to disk
    pub async fn flush(&self) -> Result<(), StoreError> {
        let db = self.connect().await?.db.clone();
        db.flush_async()
            .await
            .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
        Ok(())
    }

    /// Get storage statistics
    pub async fn stats(&self) -> Result<StorageStats, StoreError> {
        let conn = self.connect().await?.clone();
        tokio::task::spawn_blocking(move || {
            Ok(StorageStats {
                record_count: conn.shelves.len(),
                disk_size_bytes: conn.db.size_on_disk().unwrap_or(0),
            })
        })
        .await?
    }
}
