// Storage module - PERSISTENCE
// Holds shelf records in a lazily opened sled database

mod config;
mod connection;
mod repository;
mod store;

pub use config::{ConfigError, StoreConfig, DEFAULT_DB_NAME, DEFAULT_STORE_NAME, SCHEMA_VERSION};
pub use repository::{MemoryShelfStore, SaveOutcome, SaveRejection, ShelfRepository};
pub use store::{ShelfStore, StorageStats, StoreError};
