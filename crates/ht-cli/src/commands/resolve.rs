//! Profile card lookup for one identity.

use anyhow::Result;
use ht_core::identity::Identity;
use ht_core::profile::{ProfileRecord, Role, StudentProfile, TutorProfile};
use ht_resolver::Outcome;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn run(
    state: &AppState,
    role: Role,
    identity_key: &str,
    email: Option<&str>,
) -> Result<Value> {
    let identity = Identity::new(identity_key, email.map(str::to_string), None);
    match role {
        Role::Student => resolve_as::<StudentProfile>(state, &identity).await,
        Role::Teacher => resolve_as::<TutorProfile>(state, &identity).await,
    }
}

async fn resolve_as<P: ProfileRecord>(state: &AppState, identity: &Identity) -> Result<Value> {
    let resolution = state
        .resolver::<P>()
        .resolve(&identity.key, identity.email.as_deref())
        .await?;

    let (strategy, document_key) = match &resolution.outcome {
        Outcome::Found(found) => (Some(found.strategy), Some(found.document_key.as_str())),
        Outcome::NotFound => (None, None),
    };
    Ok(json!({
        "found": resolution.is_found(),
        "strategy": strategy,
        "documentKey": document_key,
        "card": resolution.card(identity),
        "skipped": resolution.diagnostics,
    }))
}
