// Connection bootstrap
// Opens the database directory, stamps the schema version and creates the collection

use crate::storage::{StoreConfig, StoreError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use tracing::{debug, info};

mod keys {
    pub const SCHEMA_VERSION: &[u8] = b"meta:schema_version";
}

/// Databases currently open in this process, keyed by canonical path
///
/// sled holds an exclusive file lock, so every store pointed at the same
/// directory must reuse one handle. Entries die with their last connection.
static OPEN_DATABASES: OnceLock<Mutex<HashMap<PathBuf, Weak<sled::Db>>>> = OnceLock::new();

/// An open database plus its record collection
#[derive(Clone)]
pub(crate) struct Connection {
    pub(crate) db: Arc<sled::Db>,
    pub(crate) shelves: sled::Tree,
}

/// Reuse the process-wide handle for `path`, or open it and register it
fn shared_db(path: &Path, config: &StoreConfig) -> Result<Arc<sled::Db>, StoreError> {
    let mut open = OPEN_DATABASES
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    open.retain(|_, db| db.strong_count() > 0);

    if let Ok(canonical) = std::fs::canonicalize(path) {
        if let Some(db) = open.get(&canonical).and_then(Weak::upgrade) {
            debug!(path = %canonical.display(), "reusing open shelf database");
            return Ok(db);
        }
    }

    let db = sled::Config::new()
        .path(path)
        .temporary(config.temporary)
        .open()
        .map_err(|e| StoreError::StorageUnavailable(format!("{}: {}", path.display(), e)))?;
    let db = Arc::new(db);

    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    open.insert(key, Arc::downgrade(&db));
    Ok(db)
}

/// Open (or create) the database at `config.db_path()`
///
/// Blocking. Stores pointed at the same path share one underlying database.
/// Safe to run against an already initialized database; only a missing schema
/// stamp or a missing collection causes writes.
pub(crate) fn open(config: &StoreConfig) -> Result<Connection, StoreError> {
    let path = config.db_path();
    debug!(path = %path.display(), "opening shelf database");

    let db = shared_db(&path, config)?;

    upgrade(&db, config)?;

    let exists = db
        .tree_names()
        .iter()
        .any(|name| name.as_ref() == config.store_name.as_bytes());
    let shelves = db.open_tree(config.store_name.as_bytes())?;
    if !exists {
        info!(store = %config.store_name, "created shelf collection");
    }

    Ok(Connection { db, shelves })
}

fn upgrade(db: &sled::Db, config: &StoreConfig) -> Result<(), StoreError> {
    let expected = config.schema_version;

    let found = match db.get(keys::SCHEMA_VERSION)? {
        Some(bytes) => {
            let arr: [u8; 4] = bytes.as_ref().try_into().map_err(|_| {
                StoreError::DeserializationFailed("Invalid schema version length".to_string())
            })?;
            Some(u32::from_be_bytes(arr))
        }
        None => None,
    };

    match found {
        Some(found) if found > expected => Err(StoreError::VersionMismatch { found, expected }),
        Some(found) if found == expected => Ok(()),
        _ => {
            db.insert(keys::SCHEMA_VERSION, expected.to_be_bytes().to_vec())?;
            db.flush()
                .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
            info!(from = ?found, to = expected, "stamped shelf schema version");
            Ok(())
        }
    }
}
