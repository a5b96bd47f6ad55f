use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{ContactsError, ContactsResult};

use super::KeyValueStore;

/// Durable key-value store backed by one SQLite table.
pub struct SqliteStore {
    conn: Connection,
    quota: Option<usize>,
}

/// Create the key-value table if it doesn't exist.
pub fn initialize(conn: &Connection) -> ContactsResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

impl SqliteStore {
    pub fn open(path: &Path) -> ContactsResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> ContactsResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> ContactsResult<Self> {
        initialize(&conn)?;
        Ok(Self { conn, quota: None })
    }

    /// Cap the total byte size of stored values. Writes past it fail.
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn keys(&self) -> ContactsResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn used_without(&self, key: &str) -> ContactsResult<usize> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(length(CAST(value AS BLOB))), 0) FROM kv_store WHERE key <> ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(used.max(0) as usize)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> ContactsResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> ContactsResult<()> {
        if let Some(limit) = self.quota {
            let needed = self.used_without(key)? + value.len();
            if needed > limit {
                return Err(ContactsError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ContactsResult<()> {
        self.conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Create an in-memory store for testing.
pub fn test_store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}
