//! Redb Engine
//!
//! Durable, ordered on-disk storage backed by a single redb table.

use std::path::{Path, PathBuf};

use redb::{Database, ReadableTable, TableDefinition, TableError};
use tracing::{debug, info};

use super::StoreAdapter;
use crate::error::StoreError;

/// Single table holding every raw key.
const TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("ttlkv");

// == Redb Store ==
/// [`StoreAdapter`] over a redb database file.
///
/// Opened once, shared by reference (or `Arc`) across callers, and closed
/// by consuming it with [`StoreAdapter::close`].
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    // == Open ==
    /// Opens the database at `path`, creating the file and any missing parent
    /// directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path).map_err(StoreError::engine)?;

        // Create the table up front so readers never race its creation.
        let txn = db.begin_write().map_err(StoreError::engine)?;
        txn.open_table(TABLE).map_err(StoreError::engine)?;
        txn.commit().map_err(StoreError::engine)?;

        info!("Opened store at {}", path.display());
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreAdapter for RedbStore {
    fn raw_get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self.db.begin_read().map_err(StoreError::engine)?;
        let table = match txn.open_table(TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(StoreError::engine(e)),
        };
        let value = table.get(key).map_err(StoreError::engine)?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    fn raw_put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(StoreError::engine)?;
        {
            let mut table = txn.open_table(TABLE).map_err(StoreError::engine)?;
            table.insert(key, value).map_err(StoreError::engine)?;
        }
        txn.commit().map_err(StoreError::engine)
    }

    fn raw_delete(&self, key: &[u8]) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(StoreError::engine)?;
        {
            let mut table = txn.open_table(TABLE).map_err(StoreError::engine)?;
            table.remove(key).map_err(StoreError::engine)?;
        }
        txn.commit().map_err(StoreError::engine)
    }

    fn close(self) -> Result<(), StoreError> {
        debug!("Closing store at {}", self.path.display());
        drop(self.db);
        info!("Store closed");
        Ok(())
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").field("path", &self.path).finish()
    }
}
