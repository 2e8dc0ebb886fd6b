//! SQLite-backed document store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use ht_core::document::Document;
use rusqlite::{Connection, ErrorCode, OptionalExtension};
use serde_json::{Map, Value};

use crate::{check_field_name, DocumentStore, StoreError};

/// Document store backed by a single SQLite database.
/// Uses Mutex<Connection> for thread safety (rusqlite::Connection is !Sync).
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

fn db_err(e: rusqlite::Error) -> StoreError {
    match e.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            StoreError::Unavailable(e.to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}

/// Stored bodies that are not valid JSON come back as a JSON string, so the
/// caller sees a record that fails to decode rather than a store failure.
fn parse_body(collection: &str, key: &str, raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Stored body of {collection}/{key} is not JSON: {e}");
            Value::String(raw)
        }
    }
}

impl SqliteStore {
    /// Open (or create) the document database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(db_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                body_json TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            );",
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn select(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
        collection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(db_err)?;
        let rows = stmt
            .query_map(params, |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(db_err)?;

        let mut docs = Vec::new();
        for row in rows {
            let (key, raw) = row.map_err(db_err)?;
            let body = parse_body(collection, &key, raw);
            docs.push(Document::new(key, body));
        }
        Ok(docs)
    }

    fn read_body(
        conn: &Connection,
        collection: &str,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        conn.query_row(
            "SELECT body_json FROM documents WHERE collection = ?1 AND key = ?2",
            rusqlite::params![collection, key],
            |row| row.get(0),
        )
        .optional()
        .map_err(db_err)
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get_by_key(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, StoreError> {
        let conn = self.lock()?;
        Ok(Self::read_body(&conn, collection, key)?
            .map(|raw| Document::new(key, parse_body(collection, key, raw))))
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        check_field_name(field)?;
        let path = format!("$.\"{field}\"");
        self.select(
            "SELECT key, body_json FROM documents
             WHERE collection = ?1
               AND CASE WHEN json_valid(body_json)
                        THEN json_type(body_json, ?2) = 'text'
                             AND json_extract(body_json, ?2) = ?3
                        ELSE 0 END
             ORDER BY key ASC",
            rusqlite::params![collection, path, value],
            collection,
        )
    }

    async fn scan_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.select(
            "SELECT key, body_json FROM documents WHERE collection = ?1 ORDER BY key ASC",
            rusqlite::params![collection],
            collection,
        )
    }

    async fn put(&self, collection: &str, key: &str, body: Value) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(&body).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO documents (collection, key, body_json) VALUES (?1, ?2, ?3)",
            rusqlite::params![collection, key, raw],
        )
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let raw = Self::read_body(&conn, collection, key)?.ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            key: key.to_string(),
        })?;
        let mut existing = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            _ => {
                return Err(StoreError::InvalidDocument(format!(
                    "{collection}/{key} is not an object"
                )))
            }
        };
        existing.extend(fields);
        let merged = serde_json::to_string(&existing)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        conn.execute(
            "UPDATE documents SET body_json = ?3 WHERE collection = ?1 AND key = ?2",
            rusqlite::params![collection, key, merged],
        )
        .map_err(db_err)?;
        Ok(())
    }

    async fn remove(&self, collection: &str, key: &str) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND key = ?2",
                rusqlite::params![collection, key],
            )
            .map_err(db_err)?;
        Ok(removed > 0)
    }
}
