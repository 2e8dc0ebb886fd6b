//! In-memory document store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use ht_core::document::Document;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{check_field_name, DocumentStore, StoreError};

type Collection = BTreeMap<String, Value>;

/// Collections held in ordered maps, so iteration is ascending key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert documents into `collection`, replacing existing keys.
    pub async fn seed<I, K>(&self, collection: &str, docs: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut collections = self.collections.write().await;
        let target = collections.entry(collection.to_string()).or_default();
        for (key, body) in docs {
            target.insert(key.into(), body);
        }
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

fn to_documents<'a>(docs: impl Iterator<Item = (&'a String, &'a Value)>) -> Vec<Document> {
    docs.map(|(key, body)| Document::new(key.clone(), body.clone()))
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_by_key(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(key))
            .map(|body| Document::new(key, body.clone())))
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        check_field_name(field)?;
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(to_documents(docs.iter().filter(|(_, body)| {
            body.get(field).and_then(Value::as_str) == Some(value)
        })))
    }

    async fn scan_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| to_documents(docs.iter()))
            .unwrap_or_default())
    }

    async fn put(&self, collection: &str, key: &str, body: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), body);
        Ok(())
    }

    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let body = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(key))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            })?;
        let Value::Object(existing) = body else {
            return Err(StoreError::InvalidDocument(format!(
                "{collection}/{key} is not an object"
            )));
        };
        existing.extend(fields);
        Ok(())
    }

    async fn remove(&self, collection: &str, key: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|c| c.remove(key))
            .is_some())
    }
}
