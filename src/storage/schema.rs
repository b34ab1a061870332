//! Database schema definitions

/// SQL to create the key-value table.
/// One row per storage key; the quiz collection lives in a single row.
pub const CREATE_KV_STORE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

/// Upsert a value, replacing whatever the key held before
pub const UPSERT_VALUE: &str = r#"
INSERT INTO kv_store (key, value, updated_at)
VALUES (?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
"#;

pub const SELECT_VALUE: &str = "SELECT value FROM kv_store WHERE key = ?1";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_KV_STORE_TABLE]
}
