//! # Storage Module
//!
//! Durable key-value storage for persisted preferences and session state.
//!
//! The core never talks to a storage engine directly. Everything goes
//! through [`KeyValueStore`], which mirrors the string-keyed, string-valued
//! local storage the dashboard shell persists to.
//!
//! - [`MemoryStore`]: BTreeMap-backed, for tests and dry runs
//! - [`RedbStore`]: redb embedded database (ACID, crash-safe)

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::Result;

/// String key-value storage.
///
/// Implementations must make a successful `set` visible to every later
/// `get`, including after the store is reopened.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key was never written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Write several values in order.
    ///
    /// The default applies them one by one and stops at the first failure,
    /// so earlier entries may already be written. Stores with transactions
    /// override this to commit all entries or none.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
