//! Tutor roster loading.

use ht_core::profile::{ProfileRecord, TutorProfile};
use ht_store::ProfileStore;

use crate::resolver::MalformedRecord;
use crate::strategy::LookupStrategy;
use crate::ResolveError;

/// Every decodable tutor in the collection, in iteration order.
#[derive(Debug, Clone, Default)]
pub struct RosterLoad {
    pub tutors: Vec<TutorProfile>,
    pub diagnostics: Vec<MalformedRecord>,
}

pub async fn load_roster(store: &ProfileStore) -> Result<RosterLoad, ResolveError> {
    let docs = store
        .scan_all()
        .await
        .map_err(|source| ResolveError::StoreUnavailable {
            strategy: LookupStrategy::FullScan,
            collection: store.collection().to_string(),
            source,
        })?;

    let mut load = RosterLoad::default();
    for doc in docs {
        match TutorProfile::from_document(&doc) {
            Ok(tutor) => load.tutors.push(tutor),
            Err(e) => {
                tracing::warn!("Skipping tutor record: {e}");
                load.diagnostics.push(MalformedRecord {
                    document_key: doc.key,
                    strategy: LookupStrategy::FullScan,
                    message: e.to_string(),
                });
            }
        }
    }
    tracing::debug!(
        "Loaded {} tutor(s) from {}, skipped {}",
        load.tutors.len(),
        store.collection(),
        load.diagnostics.len()
    );
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_core::profile::Role;
    use ht_store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn skips_malformed_and_keeps_order() {
        let memory = Arc::new(MemoryStore::new());
        memory
            .seed(
                "teachers",
                [
                    ("t1", json!({"fullName": "A", "teachingStreams": ["JEE Preparation"]})),
                    ("t2", json!({"fullName": "B", "teachingStreams": "JEE"})),
                    ("t3", json!({"fullName": "C", "subjects": "Physics"})),
                ],
            )
            .await;
        let store = ProfileStore::new(memory, Role::Teacher, "teachers");
        let load = load_roster(&store).await.unwrap();

        let keys: Vec<_> = load.tutors.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["t1", "t3"]);
        assert_eq!(load.diagnostics.len(), 1);
        assert_eq!(load.diagnostics[0].document_key, "t2");
    }

    #[tokio::test]
    async fn empty_collection_is_an_empty_roster() {
        let store = ProfileStore::new(Arc::new(MemoryStore::new()), Role::Teacher, "teachers");
        let load = load_roster(&store).await.unwrap();
        assert!(load.tutors.is_empty());
        assert!(load.diagnostics.is_empty());
    }
}
