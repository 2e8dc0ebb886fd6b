//! Registration-rule check of a stored profile.

use anyhow::{anyhow, Result};
use ht_core::profile::{ProfileRecord, Role, StudentProfile, TutorProfile};
use ht_core::validation::{validate_student, validate_tutor, FieldError};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn run(state: &AppState, role: Role, identity_key: &str) -> Result<Value> {
    match role {
        Role::Student => check::<StudentProfile>(state, identity_key, validate_student).await,
        Role::Teacher => check::<TutorProfile>(state, identity_key, validate_tutor).await,
    }
}

async fn check<P: ProfileRecord>(
    state: &AppState,
    identity_key: &str,
    rules: fn(&P) -> Vec<FieldError>,
) -> Result<Value> {
    let profile = state
        .resolver::<P>()
        .resolve(identity_key, None)
        .await?
        .into_profile()
        .ok_or_else(|| anyhow!("no {} profile for {identity_key}", P::ROLE))?;
    let errors = rules(&profile);
    Ok(json!({
        "key": profile.key(),
        "valid": errors.is_empty(),
        "errors": errors,
    }))
}
