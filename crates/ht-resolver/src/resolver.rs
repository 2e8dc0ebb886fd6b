//! Fallback-chain profile lookup.

use std::marker::PhantomData;

use ht_core::document::{Document, EMAIL_FIELD, USER_ID_FIELD};
use ht_core::identity::{Identity, IdentityProvider};
use ht_core::profile::{ProfileCard, ProfileRecord};
use ht_store::{ProfileStore, StoreError};
use serde::Serialize;

use crate::strategy::LookupStrategy;
use crate::ResolveError;

/// A candidate document that failed to decode and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRecord {
    pub document_key: String,
    pub strategy: LookupStrategy,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Found<P> {
    pub profile: P,
    pub strategy: LookupStrategy,
    pub document_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<P> {
    Found(Found<P>),
    NotFound,
}

/// Result of one resolution: the outcome plus any records skipped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<P> {
    pub outcome: Outcome<P>,
    pub diagnostics: Vec<MalformedRecord>,
}

impl<P> Resolution<P> {
    fn not_found(diagnostics: Vec<MalformedRecord>) -> Self {
        Self {
            outcome: Outcome::NotFound,
            diagnostics,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    pub fn profile(&self) -> Option<&P> {
        match &self.outcome {
            Outcome::Found(found) => Some(&found.profile),
            Outcome::NotFound => None,
        }
    }

    pub fn strategy(&self) -> Option<LookupStrategy> {
        match &self.outcome {
            Outcome::Found(found) => Some(found.strategy),
            Outcome::NotFound => None,
        }
    }

    pub fn into_profile(self) -> Option<P> {
        match self.outcome {
            Outcome::Found(found) => Some(found.profile),
            Outcome::NotFound => None,
        }
    }
}

impl<P: ProfileRecord> Resolution<P> {
    /// Card for `identity`: the resolved profile, else a placeholder.
    pub fn card(&self, identity: &Identity) -> ProfileCard {
        match self.profile() {
            Some(profile) => ProfileCard::from_profile(profile, Some(identity)),
            None => ProfileCard::placeholder(P::ROLE, identity),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolves identities to profiles of type `P` in one role's collection.
///
/// The cascade is sequential and stops at the first strategy that yields a
/// decodable record. Absence is an outcome, not an error; a store failure
/// aborts the cascade.
pub struct ProfileResolver<P> {
    store: ProfileStore,
    _profile: PhantomData<fn() -> P>,
}

impl<P: ProfileRecord> ProfileResolver<P> {
    pub fn new(store: ProfileStore) -> Self {
        if store.role() != P::ROLE {
            tracing::warn!(
                "Resolving {} profiles from the {} collection {}",
                P::ROLE,
                store.role(),
                store.collection()
            );
        }
        Self {
            store,
            _profile: PhantomData,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Find the profile of `identity_key`, falling back to `email`.
    ///
    /// A blank key skips the key-based strategies; a blank email skips the
    /// email-based ones.
    pub async fn resolve(
        &self,
        identity_key: &str,
        email: Option<&str>,
    ) -> Result<Resolution<P>, ResolveError> {
        let key = non_blank(Some(identity_key));
        let email = non_blank(email);
        let mut diagnostics = Vec::new();

        if key.is_none() && email.is_none() {
            tracing::debug!("Nothing to resolve in {}", self.store.collection());
            return Ok(Resolution::not_found(diagnostics));
        }

        for strategy in LookupStrategy::CASCADE {
            let Some(candidates) = self.candidates(strategy, key, email).await? else {
                continue;
            };
            tracing::debug!(
                "{strategy} lookup in {} returned {} candidate(s)",
                self.store.collection(),
                candidates.len()
            );
            for doc in candidates {
                match P::from_document(&doc) {
                    Ok(profile) => {
                        tracing::info!(
                            "Resolved {} profile {} by {strategy}",
                            P::ROLE,
                            doc.key
                        );
                        return Ok(Resolution {
                            outcome: Outcome::Found(Found {
                                profile,
                                strategy,
                                document_key: doc.key,
                            }),
                            diagnostics,
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Skipping record during {strategy} lookup: {e}");
                        if !diagnostics
                            .iter()
                            .any(|d: &MalformedRecord| d.document_key == doc.key)
                        {
                            diagnostics.push(MalformedRecord {
                                document_key: doc.key,
                                strategy,
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        tracing::debug!(
            "No {} profile for {} in {}",
            P::ROLE,
            key.or(email).unwrap_or_default(),
            self.store.collection()
        );
        Ok(Resolution::not_found(diagnostics))
    }

    /// Resolve the provider's current identity. Signed out means not found,
    /// without touching the store.
    pub async fn resolve_current(
        &self,
        provider: &dyn IdentityProvider,
    ) -> Result<Resolution<P>, ResolveError> {
        match provider.current_identity() {
            Some(identity) => self.resolve(&identity.key, identity.email.as_deref()).await,
            None => Ok(Resolution::not_found(Vec::new())),
        }
    }

    /// Card for `identity`: its profile when one resolves, else a placeholder.
    pub async fn resolve_card(&self, identity: &Identity) -> Result<ProfileCard, ResolveError> {
        let resolution = self
            .resolve(&identity.key, identity.email.as_deref())
            .await?;
        Ok(resolution.card(identity))
    }

    /// Documents a strategy proposes, or `None` when it does not apply.
    async fn candidates(
        &self,
        strategy: LookupStrategy,
        key: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Vec<Document>>, ResolveError> {
        let unavailable = |source: StoreError| ResolveError::StoreUnavailable {
            strategy,
            collection: self.store.collection().to_string(),
            source,
        };

        let candidates: Vec<Document> = match strategy {
            LookupStrategy::PrimaryKey => {
                let Some(key) = key else { return Ok(None) };
                self.store
                    .get_by_key(key)
                    .await
                    .map_err(unavailable)?
                    .into_iter()
                    .collect()
            }
            LookupStrategy::UserIdField => {
                let Some(key) = key else { return Ok(None) };
                self.store
                    .query_by_field(USER_ID_FIELD, key)
                    .await
                    .map_err(unavailable)?
            }
            LookupStrategy::EmailField => {
                let Some(email) = email else { return Ok(None) };
                self.store
                    .query_by_field(EMAIL_FIELD, email)
                    .await
                    .map_err(unavailable)?
            }
            LookupStrategy::FullScan => self
                .store
                .scan_all()
                .await
                .map_err(unavailable)?
                .into_iter()
                .filter(|doc| {
                    key.is_some_and(|k| doc.key == k || doc.field_equals(USER_ID_FIELD, k))
                        || email.is_some_and(|e| doc.field_equals(EMAIL_FIELD, e))
                })
                .collect(),
        };
        Ok(Some(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ht_core::identity::{Session, StaticIdentity};
    use ht_core::profile::{Role, StudentProfile, TutorProfile};
    use ht_store::{DocumentStore, MemoryStore};
    use serde_json::{json, Map, Value};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every call and optionally fails one kind of call.
    struct RecordingStore {
        inner: MemoryStore,
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
        /// Field queries come back empty, as from a store without an index.
        blind_queries: AtomicBool,
    }

    impl RecordingStore {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                inner: MemoryStore::new(),
                calls: Mutex::new(Vec::new()),
                fail_on,
                blind_queries: AtomicBool::new(false),
            }
        }

        fn record(&self, call: String, op: &str) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push(call);
            if self.fail_on == Some(op) {
                return Err(StoreError::Unavailable("offline".into()));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for RecordingStore {
        async fn get_by_key(&self, c: &str, k: &str) -> Result<Option<Document>, StoreError> {
            self.record(format!("get:{k}"), "get")?;
            self.inner.get_by_key(c, k).await
        }

        async fn query_by_field(
            &self,
            c: &str,
            f: &str,
            v: &str,
        ) -> Result<Vec<Document>, StoreError> {
            self.record(format!("query:{f}={v}"), "query")?;
            if self.blind_queries.load(Ordering::SeqCst) {
                return Ok(Vec::new());
            }
            self.inner.query_by_field(c, f, v).await
        }

        async fn scan_all(&self, c: &str) -> Result<Vec<Document>, StoreError> {
            self.record("scan".into(), "scan")?;
            self.inner.scan_all(c).await
        }

        async fn put(&self, c: &str, k: &str, b: Value) -> Result<(), StoreError> {
            self.inner.put(c, k, b).await
        }

        async fn update_fields(
            &self,
            c: &str,
            k: &str,
            f: Map<String, Value>,
        ) -> Result<(), StoreError> {
            self.inner.update_fields(c, k, f).await
        }

        async fn remove(&self, c: &str, k: &str) -> Result<bool, StoreError> {
            self.inner.remove(c, k).await
        }
    }

    async fn fixture(
        fail_on: Option<&'static str>,
        docs: Vec<(&'static str, Value)>,
    ) -> (Arc<RecordingStore>, ProfileResolver<StudentProfile>) {
        let store = Arc::new(RecordingStore::new(fail_on));
        store.inner.seed("students", docs).await;
        let profiles = ProfileStore::new(store.clone(), Role::Student, "students");
        (store, ProfileResolver::new(profiles))
    }

    #[tokio::test]
    async fn direct_key_hit_needs_no_queries() {
        let (store, resolver) = fixture(
            None,
            vec![("K", json!({"userId": "K", "fullName": "Asha"}))],
        )
        .await;
        let resolution = resolver.resolve("K", Some("asha@x.com")).await.unwrap();
        assert_eq!(resolution.strategy(), Some(LookupStrategy::PrimaryKey));
        assert_eq!(store.calls(), vec!["get:K"]);
    }

    #[tokio::test]
    async fn user_id_field_hit_stops_before_email() {
        let (store, resolver) = fixture(
            None,
            vec![
                ("-Nb2", json!({"userId": "K", "fullName": "Second"})),
                ("-Na1", json!({"userId": "K", "fullName": "First"})),
            ],
        )
        .await;
        let resolution = resolver.resolve("K", None).await.unwrap();
        let Outcome::Found(found) = resolution.outcome else {
            panic!("expected a match");
        };
        assert_eq!(found.strategy, LookupStrategy::UserIdField);
        assert_eq!(found.document_key, "-Na1");
        assert_eq!(found.profile.base.full_name.as_deref(), Some("First"));
        assert_eq!(store.calls(), vec!["get:K", "query:userId=K"]);
    }

    #[tokio::test]
    async fn email_field_hit() {
        let (store, resolver) = fixture(
            None,
            vec![("-Nc", json!({"email": "e@x.com", "fullName": "Esha"}))],
        )
        .await;
        let resolution = resolver.resolve("K", Some("e@x.com")).await.unwrap();
        assert_eq!(resolution.strategy(), Some(LookupStrategy::EmailField));
        assert_eq!(
            store.calls(),
            vec!["get:K", "query:userId=K", "query:email=e@x.com"]
        );
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let (_, resolver) = fixture(
            None,
            vec![("-Nc", json!({"email": "E@x.com"}))],
        )
        .await;
        let resolution = resolver.resolve("K", Some("e@x.com")).await.unwrap();
        assert!(!resolution.is_found());
    }

    #[tokio::test]
    async fn all_strategies_empty_is_not_found() {
        let (store, resolver) = fixture(
            None,
            vec![("other", json!({"userId": "Z", "email": "z@x.com"}))],
        )
        .await;
        let resolution = resolver.resolve("K", Some("e@x.com")).await.unwrap();
        assert_eq!(resolution.outcome, Outcome::NotFound);
        assert!(resolution.diagnostics.is_empty());
        assert_eq!(store.calls().last().map(String::as_str), Some("scan"));
    }

    #[tokio::test]
    async fn store_failure_aborts_the_cascade() {
        let (store, resolver) = fixture(Some("query"), vec![]).await;
        let err = resolver.resolve("K", Some("e@x.com")).await.unwrap_err();
        let ResolveError::StoreUnavailable {
            strategy,
            collection,
            ..
        } = err;
        assert_eq!(strategy, LookupStrategy::UserIdField);
        assert_eq!(collection, "students");
        assert_eq!(store.calls(), vec!["get:K", "query:userId=K"]);
    }

    #[tokio::test]
    async fn malformed_candidates_are_skipped_and_reported() {
        let (_, resolver) = fixture(
            None,
            vec![
                ("K", json!({"age": "not a number"})),
                ("-Nd", json!({"userId": "K", "fullName": "Valid"})),
            ],
        )
        .await;
        let resolution = resolver.resolve("K", None).await.unwrap();
        assert_eq!(resolution.strategy(), Some(LookupStrategy::UserIdField));
        assert_eq!(resolution.diagnostics.len(), 1);
        assert_eq!(resolution.diagnostics[0].document_key, "K");
        assert_eq!(
            resolution.diagnostics[0].strategy,
            LookupStrategy::PrimaryKey
        );
    }

    #[tokio::test]
    async fn malformed_record_reported_once_across_strategies() {
        let (_, resolver) = fixture(
            None,
            vec![("K", json!({"userId": "K", "subjectsNeeded": 5}))],
        )
        .await;
        let resolution = resolver.resolve("K", None).await.unwrap();
        assert!(!resolution.is_found());
        assert_eq!(resolution.diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn blank_inputs_skip_their_strategies() {
        let (store, resolver) = fixture(None, vec![]).await;
        let resolution = resolver.resolve("  ", Some("")).await.unwrap();
        assert!(!resolution.is_found());
        assert!(store.calls().is_empty());

        let (store, resolver) = fixture(
            None,
            vec![("-Ne", json!({"email": "e@x.com"}))],
        )
        .await;
        let resolution = resolver.resolve("", Some("e@x.com")).await.unwrap();
        assert_eq!(resolution.strategy(), Some(LookupStrategy::EmailField));
        assert_eq!(store.calls(), vec!["query:email=e@x.com"]);
    }

    #[tokio::test]
    async fn full_scan_catches_what_field_queries_miss() {
        let (store, resolver) = fixture(
            None,
            vec![("-Nf", json!({"userId": "K", "fullName": "Unindexed"}))],
        )
        .await;
        store.blind_queries.store(true, Ordering::SeqCst);
        let resolution = resolver.resolve("K", Some("e@x.com")).await.unwrap();
        assert_eq!(resolution.strategy(), Some(LookupStrategy::FullScan));
        assert_eq!(store.calls().len(), 4);
    }

    #[tokio::test]
    async fn signed_out_provider_is_not_found_without_store_calls() {
        let (store, resolver) = fixture(None, vec![]).await;
        let resolution = resolver
            .resolve_current(&StaticIdentity::default())
            .await
            .unwrap();
        assert!(!resolution.is_found());
        assert!(store.calls().is_empty());

        let session = Session::signed_in(
            Identity::new("K", Some("e@x.com".into()), None),
            Role::Student,
        );
        resolver.resolve_current(&session).await.unwrap();
        assert_eq!(store.calls()[0], "get:K");
    }

    #[tokio::test]
    async fn card_falls_back_to_placeholder() {
        let (_, resolver) = fixture(
            None,
            vec![("K", json!({"fullName": "Asha Patil"}))],
        )
        .await;
        let found = resolver
            .resolve_card(&Identity::new("K", None, None))
            .await
            .unwrap();
        assert_eq!(found.display_name, "Asha Patil");
        assert!(!found.placeholder);

        let missing = resolver
            .resolve_card(&Identity::new("Q", Some("abc123@x.com".into()), None))
            .await
            .unwrap();
        assert_eq!(missing.display_name, "Abc");
        assert!(missing.placeholder);
    }

    #[tokio::test]
    async fn tutor_resolution_uses_teacher_collection() {
        let memory = Arc::new(MemoryStore::new());
        memory
            .seed(
                "teachers",
                [("T", json!({"userId": "T", "subjects": "Physics"}))],
            )
            .await;
        let resolver: ProfileResolver<TutorProfile> =
            ProfileResolver::new(ProfileStore::new(memory, Role::Teacher, "teachers"));
        let tutor = resolver.resolve("T", None).await.unwrap().into_profile();
        assert!(tutor.unwrap().subject_tags().matches("physics"));
    }
}
