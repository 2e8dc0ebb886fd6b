//! Profile cards: what a dashboard header or profile screen shows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ProfileRecord, Role};
use crate::display_name::derive_display_name;
use crate::identity::Identity;
use crate::photo::PhotoSummary;
use crate::tags::Tags;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCard {
    pub role: Role,
    pub identity_key: String,
    pub display_name: String,
    pub email: Option<String>,
    pub photo: Option<PhotoSummary>,
    pub subjects: Tags,
    pub streams: Tags,
    pub verified: bool,
    pub member_since: Option<DateTime<Utc>>,
    /// True when no stored profile backs this card.
    pub placeholder: bool,
}

impl ProfileCard {
    /// Card for a stored profile. The identity's display name is used when
    /// the record has no name of its own.
    pub fn from_profile<P: ProfileRecord>(profile: &P, identity: Option<&Identity>) -> Self {
        let base = profile.base();
        let email = base
            .email
            .clone()
            .or_else(|| identity.and_then(|i| i.email.clone()));
        let display_name = match base.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => name.trim().to_string(),
            None => derive_display_name(
                identity.and_then(|i| i.display_name.as_deref()),
                email.as_deref(),
                P::ROLE,
            ),
        };

        Self {
            role: P::ROLE,
            identity_key: profile.identity_key().to_string(),
            display_name,
            email,
            photo: base.photo().as_ref().map(PhotoSummary::from),
            subjects: profile.subject_tags(),
            streams: profile.stream_tags(),
            verified: base.verified,
            member_since: base.created_at_utc(),
            placeholder: false,
        }
    }

    /// Card for an identity whose profile record does not exist (yet).
    pub fn placeholder(role: Role, identity: &Identity) -> Self {
        Self {
            role,
            identity_key: identity.key.clone(),
            display_name: derive_display_name(
                identity.display_name.as_deref(),
                identity.email.as_deref(),
                role,
            ),
            email: identity.email.clone(),
            photo: None,
            subjects: Tags::default(),
            streams: Tags::default(),
            verified: false,
            member_since: None,
            placeholder: true,
        }
    }
}
