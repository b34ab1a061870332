//! SQLite storage implementation

use std::path::Path;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use crate::Result;
use super::{StoragePort, schema};

/// SQLite-backed key-value storage
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }
}

impl StoragePort for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(schema::SELECT_VALUE, [key], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // A single statement is atomic, so a failed write leaves the old row
        self.conn.execute(
            schema::UPSERT_VALUE,
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_in_memory() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.get("quizzes").unwrap(), None);

        storage.set("quizzes", "[]").unwrap();
        assert_eq!(storage.get("quizzes").unwrap().as_deref(), Some("[]"));

        storage.set("quizzes", "[1]").unwrap();
        assert_eq!(storage.get("quizzes").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizdeck.db");

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.set("quizzes", r#"[{"title":"kept"}]"#).unwrap();
        }

        let reopened = SqliteStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get("quizzes").unwrap().as_deref(),
            Some(r#"[{"title":"kept"}]"#)
        );
    }
}
