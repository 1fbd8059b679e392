//! # redb-backed Session Store
//!
//! A disk-backed session store using the redb embedded database.
//!
//! One table maps session keys to their string values. Every `set` and
//! `remove` runs in its own write transaction, so a value is either fully
//! written or not at all.

use super::SessionStore;
use crate::AdmissionError;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;

/// Table for session entries: key string -> value string
const SESSION: TableDefinition<&str, &str> = TableDefinition::new("session");

fn storage_err(e: impl std::fmt::Display) -> AdmissionError {
    AdmissionError::Storage(e.to_string())
}

/// A [`SessionStore`] persisted in a redb database file.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a session database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AdmissionError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Initialize the table so read transactions never see it missing
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(SESSION).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        Ok(Self { db })
    }
}

impl SessionStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, AdmissionError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(SESSION).map_err(storage_err)?;
        let value = table
            .get(key)
            .map_err(storage_err)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AdmissionError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(SESSION).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), AdmissionError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(SESSION).map_err(storage_err)?;
            table.remove(key).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)
    }
}
