//! Filtered tutor listing.

use anyhow::Result;
use ht_core::profile::{ProfileRecord, Role, TutorProfile};
use ht_core::tags::eq_ignore_case;
use ht_filter::{FilterSpec, RosterView, STREAM_OPTIONS, SUBJECT_OPTIONS};
use ht_resolver::load_roster;
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// One line of the tutor listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorRow {
    pub key: String,
    pub name: String,
    pub qualification: Option<String>,
    pub experience_years: u32,
    pub subjects: Vec<String>,
    pub streams: Vec<String>,
    pub location: Option<String>,
    pub rating: String,
    pub verified: bool,
}

impl From<&TutorProfile> for TutorRow {
    fn from(tutor: &TutorProfile) -> Self {
        Self {
            key: tutor.key.clone(),
            name: tutor.display_name(),
            qualification: tutor.qualification().map(str::to_string),
            experience_years: tutor.experience_years(),
            subjects: owned(tutor.subject_tags().values()),
            streams: owned(tutor.stream_tags().values()),
            location: tutor.locations().next().map(str::to_string),
            rating: tutor.rating().to_string(),
            verified: tutor.base.verified,
        }
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

fn warn_if_uncatalogued(kind: &str, value: &str, options: &[&str]) {
    if !options.iter().any(|option| eq_ignore_case(option, value.trim())) {
        tracing::warn!("{kind} '{value}' is not one of the offered options");
    }
}

pub async fn run(
    state: &AppState,
    stream: String,
    subject: String,
    location: String,
) -> Result<Value> {
    warn_if_uncatalogued("Stream", &stream, &STREAM_OPTIONS);
    warn_if_uncatalogued("Subject", &subject, &SUBJECT_OPTIONS);

    let load = load_roster(&state.profiles(Role::Teacher)).await?;
    let mut view = RosterView::new(load.tutors);
    let rows: Vec<TutorRow> = view
        .apply(FilterSpec::new(stream, subject, location))
        .into_iter()
        .map(TutorRow::from)
        .collect();

    Ok(json!({
        "total": view.roster().len(),
        "matched": rows.len(),
        "tutors": rows,
        "skipped": load.diagnostics,
    }))
}
