//! redb-backed store.
//!
//! One table, `preferences`, mapping `&str -> &str`. Every write runs in its
//! own transaction and is committed before returning.

use super::KeyValueStore;
use crate::{CoreError, Result};
use redb::{Database, ReadableDatabase, TableDefinition};
use std::fmt::Display;
use std::path::{Path, PathBuf};

const PREFERENCES: TableDefinition<'_, &str, &str> = TableDefinition::new("preferences");

fn storage_err(context: &str, e: impl Display) -> CoreError {
    CoreError::Storage(format!("{context}: {e}"))
}

/// Durable [`KeyValueStore`] on top of a redb database file.
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").field("path", &self.path).finish()
    }
}

impl RedbStore {
    /// Open the database at `path`, creating it (and the table) if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let db = Database::create(&path).map_err(|e| storage_err("open database", e))?;

        let txn = db.begin_write().map_err(|e| storage_err("begin write", e))?;
        {
            txn.open_table(PREFERENCES)
                .map_err(|e| storage_err("create table", e))?;
        }
        txn.commit().map_err(|e| storage_err("commit", e))?;

        tracing::debug!(path = %path.display(), "opened preference database");
        Ok(Self { db, path })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| storage_err("begin read", e))?;
        let table = txn
            .open_table(PREFERENCES)
            .map_err(|e| storage_err("open table", e))?;
        let value = table
            .get(key)
            .map_err(|e| storage_err("read", e))?
            .map(|guard| guard.value().to_owned());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| storage_err("begin write", e))?;
        {
            let mut table = txn
                .open_table(PREFERENCES)
                .map_err(|e| storage_err("open table", e))?;
            table
                .insert(key, value)
                .map_err(|e| storage_err("write", e))?;
        }
        txn.commit().map_err(|e| storage_err("commit", e))
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| storage_err("begin write", e))?;
        {
            let mut table = txn
                .open_table(PREFERENCES)
                .map_err(|e| storage_err("open table", e))?;
            for (key, value) in entries {
                table
                    .insert(*key, *value)
                    .map_err(|e| storage_err("write", e))?;
            }
        }
        txn.commit().map_err(|e| storage_err("commit", e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| storage_err("begin write", e))?;
        {
            let mut table = txn
                .open_table(PREFERENCES)
                .map_err(|e| storage_err("open table", e))?;
            table.remove(key).map_err(|e| storage_err("delete", e))?;
        }
        txn.commit().map_err(|e| storage_err("commit", e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.redb");

        {
            let mut store = RedbStore::open(&path).unwrap();
            store.set("theme", "nubank").unwrap();
            store.set("userRole", "admin").unwrap();
            store.remove("userRole").unwrap();
        }

        let reopened = RedbStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("nubank"));
        assert_eq!(reopened.get("userRole").unwrap(), None);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn set_many_commits_together() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.redb");
        {
            let mut store = RedbStore::open(&path).unwrap();
            store
                .set_many(&[("userRole", "admin"), ("isAuthenticated", "true")])
                .unwrap();
        }

        let reopened = RedbStore::open(&path).unwrap();
        assert_eq!(reopened.get("userRole").unwrap().as_deref(), Some("admin"));
        assert_eq!(reopened.get("isAuthenticated").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RedbStore::open(dir.path().join("prefs.redb")).unwrap();
        assert!(store.remove("never-written").is_ok());
    }
}
