use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Failures of the durable key-value layer
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed value store backed by the `kv` table
pub struct KvRepo;

impl KvRepo {
    /// Get the raw value stored under `key`
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Insert or replace the value stored under `key`
    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub fn remove(conn: &Connection, key: &str) -> Result<(), StoreError> {
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Read and decode a JSON value.
    ///
    /// Absent keys and values that fail to decode both yield `None`; the
    /// latter is logged since it means the stored document was damaged.
    pub fn get_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = Self::get(conn, key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Ignoring malformed value for '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`
    pub fn set_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        Self::set(conn, key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;

    #[test]
    fn test_get_missing_key() {
        let conn = DbConnection::connect_in_memory().unwrap();
        assert_eq!(KvRepo::get(&conn, "nope").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let conn = DbConnection::connect_in_memory().unwrap();
        KvRepo::set(&conn, "k", "one").unwrap();
        KvRepo::set(&conn, "k", "two").unwrap();
        assert_eq!(KvRepo::get(&conn, "k").unwrap(), Some("two".to_string()));

        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0)).unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_remove() {
        let conn = DbConnection::connect_in_memory().unwrap();
        KvRepo::set(&conn, "k", "v").unwrap();
        KvRepo::remove(&conn, "k").unwrap();
        KvRepo::remove(&conn, "k").unwrap();
        assert_eq!(KvRepo::get(&conn, "k").unwrap(), None);
    }

    #[test]
    fn test_get_json_malformed_is_none() {
        let conn = DbConnection::connect_in_memory().unwrap();
        KvRepo::set(&conn, "k", "{not json").unwrap();
        let value: Option<Vec<i64>> = KvRepo::get_json(&conn, "k").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_json_values() {
        let conn = DbConnection::connect_in_memory().unwrap();
        KvRepo::set_json(&conn, "nums", &vec![1, 2, 3]).unwrap();
        assert_eq!(KvRepo::get(&conn, "nums").unwrap(), Some("[1,2,3]".to_string()));
        let value: Option<Vec<i64>> = KvRepo::get_json(&conn, "nums").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }
}
