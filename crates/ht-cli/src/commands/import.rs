//! Bulk import of exported collections.

use std::path::Path;

use anyhow::{bail, Context, Result};
use ht_core::document::Document;
use ht_core::profile::{Profile, Role};
use serde_json::{json, Value};

use crate::state::AppState;

/// Write every `{ key: document }` entry of `file` into the role's
/// collection. Documents that do not decode as the role's profile are still
/// written, and reported.
pub async fn run(state: &AppState, role: Role, file: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let export: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not JSON", file.display()))?;
    import_value(state, role, export).await
}

pub async fn import_value(state: &AppState, role: Role, export: Value) -> Result<Value> {
    let Value::Object(entries) = export else {
        bail!("expected a JSON object of documents keyed by id");
    };
    let profiles = state.profiles(role);
    let mut imported = 0usize;
    let mut malformed = Vec::new();

    for (key, body) in entries {
        if let Err(e) = Profile::from_document(role, &Document::new(key.clone(), body.clone())) {
            tracing::warn!("Importing undecodable record: {e}");
            malformed.push(key.clone());
        }
        profiles.put(&key, body).await?;
        imported += 1;
    }

    tracing::info!(
        "Imported {imported} document(s) into {}",
        profiles.collection()
    );
    Ok(json!({
        "collection": profiles.collection(),
        "imported": imported,
        "malformed": malformed,
    }))
}
