use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the database directory
pub const DEFAULT_DB_NAME: &str = "dataDB";

/// Name of the record collection inside the database
pub const DEFAULT_STORE_NAME: &str = "shelves";

/// Schema version this crate reads and writes
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from environment configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for env var {0}")]
    InvalidEnv(&'static str),
}

/// Where and how the shelf database is opened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory the database directory is created in
    pub root_dir: PathBuf,
    /// Database directory name
    pub db_name: String,
    /// Collection (sled tree) name
    pub store_name: String,
    /// Expected schema version
    pub schema_version: u32,
    /// Flush to disk before a write resolves
    pub durable_writes: bool,
    /// Delete the database when the store is dropped
    pub temporary: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            db_name: DEFAULT_DB_NAME.to_string(),
            store_name: DEFAULT_STORE_NAME.to_string(),
            schema_version: SCHEMA_VERSION,
            durable_writes: true,
            temporary: false,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `SHELVES_ROOT`, `SHELVES_DB_NAME` and `SHELVES_DURABLE_WRITES`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(root) = std::env::var("SHELVES_ROOT") {
            config.root_dir = PathBuf::from(root);
        }
        if let Ok(name) = std::env::var("SHELVES_DB_NAME") {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidEnv("SHELVES_DB_NAME"));
            }
            config.db_name = name;
        }
        if let Ok(durable) = std::env::var("SHELVES_DURABLE_WRITES") {
            config.durable_writes = durable
                .parse::<bool>()
                .map_err(|_| ConfigError::InvalidEnv("SHELVES_DURABLE_WRITES"))?;
        }

        Ok(config)
    }

    pub fn with_root_dir<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root_dir = root.as_ref().to_path_buf();
        self
    }

    pub fn with_db_name(mut self, name: &str) -> Self {
        self.db_name = name.to_string();
        self
    }

    pub fn with_store_name(mut self, name: &str) -> Self {
        self.store_name = name.to_string();
        self
    }

    pub fn with_schema_version(mut self, version: u32) -> Self {
        self.schema_version = version;
        self
    }

    pub fn with_durable_writes(mut self, durable: bool) -> Self {
        self.durable_writes = durable;
        self
    }

    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    /// Full path of the database directory
    pub fn db_path(&self) -> PathBuf {
        self.root_dir.join(&self.db_name)
    }
}
