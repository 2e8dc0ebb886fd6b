//! A role's profile collection on top of a document store.

use std::sync::Arc;

use ht_core::config::AppConfig;
use ht_core::document::Document;
use ht_core::profile::{ProfileRecord, Role};
use serde_json::{Map, Value};

use crate::{DocumentStore, StoreError};

/// The profile collection of one role.
#[derive(Clone)]
pub struct ProfileStore {
    store: Arc<dyn DocumentStore>,
    role: Role,
    collection: String,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn DocumentStore>, role: Role, collection: impl Into<String>) -> Self {
        Self {
            store,
            role,
            collection: collection.into(),
        }
    }

    /// The role's collection as named by `config`.
    pub fn for_role(store: Arc<dyn DocumentStore>, role: Role, config: &AppConfig) -> Self {
        Self::new(store, role, config.collection(role))
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn get_by_key(&self, key: &str) -> Result<Option<Document>, StoreError> {
        self.store.get_by_key(&self.collection, key).await
    }

    pub async fn query_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.store
            .query_by_field(&self.collection, field, value)
            .await
    }

    pub async fn scan_all(&self) -> Result<Vec<Document>, StoreError> {
        self.store.scan_all(&self.collection).await
    }

    /// Write a new profile under its identity key and return that key.
    pub async fn create<P: ProfileRecord>(&self, profile: &P) -> Result<String, StoreError> {
        if P::ROLE != self.role {
            return Err(StoreError::InvalidDocument(format!(
                "{} profile written to {} collection {}",
                P::ROLE,
                self.role,
                self.collection
            )));
        }
        let key = profile.identity_key().trim().to_string();
        if key.is_empty() {
            return Err(StoreError::InvalidDocument(
                "profile has no identity key".into(),
            ));
        }
        let body = profile
            .to_body()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.put(&self.collection, &key, body).await?;
        tracing::info!("Created {} profile {key}", self.role);
        Ok(key)
    }

    /// Store a raw document as-is, e.g. from an export.
    pub async fn put(&self, key: &str, body: Value) -> Result<(), StoreError> {
        self.store.put(&self.collection, key, body).await
    }

    pub async fn update(&self, key: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        self.store
            .update_fields(&self.collection, key, fields)
            .await
    }

    pub async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let removed = self.store.remove(&self.collection, key).await?;
        if removed {
            tracing::info!("Removed {} profile {key}", self.role);
        }
        Ok(removed)
    }
}
