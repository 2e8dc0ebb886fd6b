//! Subcommand handlers. Each returns the JSON printed on stdout.

pub mod import;
pub mod resolve;
pub mod tutors;
pub mod validate;

use anyhow::Result;
use serde_json::Value;

use crate::cli::Command;
use crate::state::AppState;

pub async fn run(state: &AppState, command: Command) -> Result<Value> {
    match command {
        Command::Import { role, file } => import::run(state, role, &file).await,
        Command::Resolve {
            role,
            identity_key,
            email,
        } => resolve::run(state, role, &identity_key, email.as_deref()).await,
        Command::Tutors {
            stream,
            subject,
            location,
        } => tutors::run(state, stream, subject, location).await,
        Command::Validate { role, identity_key } => {
            validate::run(state, role, &identity_key).await
        }
    }
}
