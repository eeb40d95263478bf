//! Snapshot persistence
//!
//! A key/value document store over SQLite. The scanner writes its whole
//! report under one fixed key, unconditionally overwriting the previous
//! value; the history endpoint reads it back verbatim.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// The single key the latest scan result lives under
pub const LATEST_SNAPSHOT_KEY: &str = "codebase-snapshot-latest";

/// Key/value document store for scan snapshots
pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    /// Open (or create) the store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open snapshot store at {}", path.display()))?;
        Self::init(conn)
    }

    /// In-memory store, used by tests and one-shot scans
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Store a document under a key, replacing any previous value
    pub fn put(&self, key: &str, document: &Value) -> Result<()> {
        let document_json =
            serde_json::to_string(document).context("Failed to serialize document")?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO snapshots (key, document, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at",
            params![key, document_json, now],
        )?;
        debug!(key = key, bytes = document_json.len(), "snapshot stored");

        Ok(())
    }

    /// Fetch the document stored under a key, if any
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut stmt = self
            .conn
            .prepare("SELECT document FROM snapshots WHERE key = ?1")?;

        let result = stmt.query_row([key], |row| {
            let document_json: String = row.get(0)?;
            Ok(document_json)
        });

        match result {
            Ok(document_json) => {
                let document: Value = serde_json::from_str(&document_json)
                    .context("Failed to deserialize stored document")?;
                Ok(Some(document))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_put_get_roundtrip() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let doc = json!({"structure": {"name": "root"}, "links": []});
        store.put(LATEST_SNAPSHOT_KEY, &doc).unwrap();

        let fetched = store.get(LATEST_SNAPSHOT_KEY).unwrap();
        assert_eq!(fetched, Some(doc));
    }

    #[test]
    fn test_get_missing_key() {
        let store = SnapshotStore::open_in_memory().unwrap();
        assert_eq!(store.get(LATEST_SNAPSHOT_KEY).unwrap(), None);
    }

    #[test]
    fn test_put_overwrites_previous_value() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store.put("k", &json!({"v": 1})).unwrap();
        store.put("k", &json!({"v": 2})).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!({"v": 2})));
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("nested/dir/snapshots.db");
        let store = SnapshotStore::open(&db_path).unwrap();
        store.put("k", &json!(1)).unwrap();
        assert!(db_path.exists());

        // Reopening sees the persisted document
        drop(store);
        let reopened = SnapshotStore::open(&db_path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some(json!(1)));
    }
}
