//! Storage Layer - key-value backends for the quiz document
//!
//! The quiz store never talks to a database directly. It reads and writes one
//! string value under one key through a [`StoragePort`]:
//! - `memory`: in-process map, optionally with a byte quota (tests)
//! - `sqlite`: `kv_store(key, value, updated_at)` table (CLI)

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::Result;

/// Synchronous get/set on string keys.
///
/// `set` must be all-or-nothing: on error the previous value stays readable.
pub trait StoragePort {
    /// Read the value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: StoragePort + ?Sized> StoragePort for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: StoragePort + ?Sized> StoragePort for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
