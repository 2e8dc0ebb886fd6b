//! A roster plus the filter currently applied to it.

use ht_core::profile::TutorProfile;

use crate::engine::filter_refs;
use crate::spec::FilterSpec;

/// Keeps "no filter applied yet" apart from "filter applied, nothing
/// matched": [`RosterView::visible`] is `None` only in the first case.
#[derive(Debug, Clone, Default)]
pub struct RosterView {
    roster: Vec<TutorProfile>,
    filter: Option<FilterSpec>,
}

impl RosterView {
    pub fn new(roster: Vec<TutorProfile>) -> Self {
        Self {
            roster,
            filter: None,
        }
    }

    pub fn roster(&self) -> &[TutorProfile] {
        &self.roster
    }

    pub fn active_filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    /// Apply `spec` and return the matching tutors.
    pub fn apply(&mut self, spec: FilterSpec) -> Vec<&TutorProfile> {
        tracing::debug!(
            "Filtering {} tutor(s) by stream={:?} subject={:?} location={:?}",
            self.roster.len(),
            spec.stream(),
            spec.subject(),
            spec.location_query()
        );
        self.filter = Some(spec);
        self.visible().unwrap_or_default()
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Swap in a freshly loaded roster. An active filter stays applied.
    pub fn replace_roster(&mut self, roster: Vec<TutorProfile>) {
        self.roster = roster;
    }

    /// Tutors passing the active filter, or `None` before any filter.
    pub fn visible(&self) -> Option<Vec<&TutorProfile>> {
        self.filter
            .as_ref()
            .map(|spec| filter_refs(&self.roster, spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_core::profile::ProfileRecord;

    fn tutor(key: &str, stream: &str) -> TutorProfile {
        let mut tutor = TutorProfile {
            teaching_streams: Some(vec![stream.to_string()]),
            ..Default::default()
        };
        tutor.set_key(key.to_string());
        tutor
    }

    #[test]
    fn unfiltered_differs_from_empty_result() {
        let mut view = RosterView::new(vec![tutor("a", "10th Class")]);
        assert!(view.visible().is_none());

        let hits = view.apply(FilterSpec::default().with_stream("12th Class"));
        assert!(hits.is_empty());
        assert_eq!(view.visible(), Some(Vec::new()));

        view.clear_filter();
        assert!(view.visible().is_none());
        assert!(view.active_filter().is_none());
    }

    #[test]
    fn replacing_roster_keeps_filter() {
        let mut view = RosterView::new(vec![tutor("a", "10th Class")]);
        view.apply(FilterSpec::default().with_stream("12th Class"));
        view.replace_roster(vec![tutor("b", "12th Class"), tutor("c", "10th Class")]);

        let visible = view.visible().unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].key, "b");
        assert_eq!(view.roster().len(), 2);
    }
}
