//! Timeout wrapper for store calls.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use ht_core::document::Document;
use serde_json::{Map, Value};
use tokio::time::timeout;

use crate::{DocumentStore, StoreError};

/// Wrap a store call future with a timeout.
pub async fn with_timeout<T, F>(timeout_ms: u64, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match timeout(Duration::from_millis(timeout_ms), fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(timeout_ms)),
    }
}

/// Bounds every call on the inner store to `timeout_ms`.
pub struct TimeoutStore<S> {
    inner: S,
    timeout_ms: u64,
}

impl<S: DocumentStore> TimeoutStore<S> {
    pub fn new(inner: S, timeout_ms: u64) -> Self {
        Self { inner, timeout_ms }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for TimeoutStore<S> {
    async fn get_by_key(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, StoreError> {
        with_timeout(self.timeout_ms, self.inner.get_by_key(collection, key)).await
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        with_timeout(
            self.timeout_ms,
            self.inner.query_by_field(collection, field, value),
        )
        .await
    }

    async fn scan_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        with_timeout(self.timeout_ms, self.inner.scan_all(collection)).await
    }

    async fn put(&self, collection: &str, key: &str, body: Value) -> Result<(), StoreError> {
        with_timeout(self.timeout_ms, self.inner.put(collection, key, body)).await
    }

    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        with_timeout(
            self.timeout_ms,
            self.inner.update_fields(collection, key, fields),
        )
        .await
    }

    async fn remove(&self, collection: &str, key: &str) -> Result<bool, StoreError> {
        with_timeout(self.timeout_ms, self.inner.remove(collection, key)).await
    }
}
