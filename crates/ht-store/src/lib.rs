//! ht-store: Keyed document collections behind an async trait.
//!
//! `DocumentStore` is the seam every backend implements: direct lookup by
//! key, equality query on a top-level string field, and a full scan, plus
//! the administrative writes. Query and scan results come back in ascending
//! key order.

pub mod memory;
pub mod profiles;
pub mod sqlite;
pub mod timeout;

pub use memory::MemoryStore;
pub use profiles::ProfileStore;
pub use sqlite::SqliteStore;
pub use timeout::TimeoutStore;

use std::sync::Arc;

use async_trait::async_trait;
use ht_core::document::Document;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store call timed out after {0}ms")]
    Timeout(u64),
    #[error("database error: {0}")]
    Database(String),
    #[error("document not found: {collection}/{key}")]
    NotFound { collection: String, key: String },
    #[error("invalid field name: {0}")]
    InvalidField(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether the failure says nothing about the data itself.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_by_key(&self, collection: &str, key: &str)
        -> Result<Option<Document>, StoreError>;

    /// Documents whose top-level `field` is the string `value`.
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;

    async fn scan_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Insert or replace the document at `key`.
    async fn put(&self, collection: &str, key: &str, body: Value) -> Result<(), StoreError>;

    /// Shallow-merge `fields` into the existing object at `key`.
    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Returns whether a document was removed.
    async fn remove(&self, collection: &str, key: &str) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    async fn get_by_key(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, StoreError> {
        (**self).get_by_key(collection, key).await
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).query_by_field(collection, field, value).await
    }

    async fn scan_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        (**self).scan_all(collection).await
    }

    async fn put(&self, collection: &str, key: &str, body: Value) -> Result<(), StoreError> {
        (**self).put(collection, key, body).await
    }

    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        (**self).update_fields(collection, key, fields).await
    }

    async fn remove(&self, collection: &str, key: &str) -> Result<bool, StoreError> {
        (**self).remove(collection, key).await
    }
}

/// Field names are plain top-level identifiers.
pub(crate) fn check_field_name(field: &str) -> Result<(), StoreError> {
    let ok = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidField(field.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_checked() {
        assert!(check_field_name("userId").is_ok());
        assert!(check_field_name("aadhar_image").is_ok());
        assert!(check_field_name("").is_err());
        assert!(check_field_name("a.b").is_err());
        assert!(check_field_name("x') OR 1=1 --").is_err());
    }

    #[test]
    fn transient_errors() {
        assert!(StoreError::Timeout(5).is_transient());
        assert!(StoreError::Unavailable("offline".into()).is_transient());
        assert!(!StoreError::Database("corrupt".into()).is_transient());
    }
}
