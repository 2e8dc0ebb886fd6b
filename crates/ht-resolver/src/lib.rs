//! ht-resolver: Profile resolution for signed-in identities.
//!
//! Profile records are keyed by identity key by convention only, so a lookup
//! escalates through progressively broader strategies until one matches.

pub mod resolver;
pub mod roster;
pub mod strategy;

pub use resolver::{Found, MalformedRecord, Outcome, ProfileResolver, Resolution};
pub use roster::{load_roster, RosterLoad};
pub use strategy::LookupStrategy;

use ht_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("store unavailable during {strategy} lookup in {collection}: {source}")]
    StoreUnavailable {
        strategy: LookupStrategy,
        collection: String,
        #[source]
        source: StoreError,
    },
}
