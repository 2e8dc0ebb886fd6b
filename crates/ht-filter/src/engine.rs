//! The filter itself. Pure and synchronous; missing fields fail their clause.

use ht_core::profile::{ProfileRecord, TutorProfile};
use ht_core::tags::contains_ignore_case;

use crate::spec::FilterSpec;

/// Whether `tutor` satisfies every clause of `spec`.
pub fn matches(tutor: &TutorProfile, spec: &FilterSpec) -> bool {
    let stream_ok = spec
        .stream_constraint()
        .map_or(true, |stream| tutor.stream_tags().contains(stream));
    let subject_ok = spec
        .subject_constraint()
        .map_or(true, |subject| tutor.subject_tags().matches(subject));
    let location_ok = spec.location_constraint().map_or(true, |query| {
        tutor
            .locations()
            .any(|place| contains_ignore_case(place, query))
    });
    stream_ok && subject_ok && location_ok
}

/// Matching tutors, in roster order.
pub fn filter(roster: &[TutorProfile], spec: &FilterSpec) -> Vec<TutorProfile> {
    filter_refs(roster, spec).into_iter().cloned().collect()
}

/// Like [`filter`], borrowing from the roster.
pub fn filter_refs<'a>(roster: &'a [TutorProfile], spec: &FilterSpec) -> Vec<&'a TutorProfile> {
    roster.iter().filter(|tutor| matches(tutor, spec)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_core::document::Document;
    use serde_json::{json, Value};

    fn tutor(key: &str, body: Value) -> TutorProfile {
        TutorProfile::from_document(&Document::new(key, body)).unwrap()
    }

    fn keys(tutors: &[TutorProfile]) -> Vec<&str> {
        tutors.iter().map(|t| t.key.as_str()).collect()
    }

    fn stream_roster() -> Vec<TutorProfile> {
        vec![
            tutor("T1", json!({"teachingStreams": ["JEE Preparation"]})),
            tutor("T2", json!({"teachingStreams": ["NEET Preparation"]})),
            tutor(
                "T3",
                json!({"teachingStreams": ["JEE Preparation", "NEET Preparation"]}),
            ),
        ]
    }

    #[test]
    fn stream_filter_keeps_order() {
        let spec = FilterSpec::default().with_stream("JEE Preparation");
        assert_eq!(keys(&filter(&stream_roster(), &spec)), vec!["T1", "T3"]);

        let spec = FilterSpec::default().with_stream("jee preparation");
        assert_eq!(keys(&filter(&stream_roster(), &spec)), vec!["T1", "T3"]);

        // Streams match whole entries only.
        let spec = FilterSpec::default().with_stream("JEE");
        assert!(filter(&stream_roster(), &spec).is_empty());
    }

    #[test]
    fn unconstrained_filter_is_identity() {
        let roster = stream_roster();
        assert_eq!(filter(&roster, &FilterSpec::default()), roster);
        assert!(filter(&[], &FilterSpec::default()).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let spec = FilterSpec::new("NEET Preparation", "All Subjects", "");
        let once = filter(&stream_roster(), &spec);
        let twice = filter(&once, &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn legacy_subject_string_matches_by_substring() {
        let roster = vec![
            tutor("L1", json!({"subjects": "Physics, Chemistry"})),
            tutor("L2", json!({"subjects": "Applied Mathematics"})),
            tutor("S1", json!({"subjectsTaught": ["Applied Mathematics"]})),
        ];
        let physics = FilterSpec::default().with_subject("Physics");
        assert_eq!(keys(&filter(&roster, &physics)), vec!["L1"]);

        let maths = FilterSpec::default().with_subject("mathematics");
        assert_eq!(keys(&filter(&roster, &maths)), vec!["L2"]);
    }

    #[test]
    fn legacy_subject_query_may_span_commas() {
        let roster = vec![tutor("L1", json!({"subjects": "Physics, Chemistry"}))];
        let spec = FilterSpec::default().with_subject("Physics, Chemistry");
        assert_eq!(keys(&filter(&roster, &spec)), vec!["L1"]);
    }

    #[test]
    fn stream_entries_are_compared_untrimmed() {
        let roster = vec![tutor("P", json!({"teachingStreams": [" JEE Preparation "]}))];
        let spec = FilterSpec::default().with_stream("JEE Preparation");
        assert!(filter(&roster, &spec).is_empty());
    }

    #[test]
    fn structured_subjects_match_exactly_ignoring_case() {
        let roster = vec![tutor("S1", json!({"subjectsTaught": ["Physics", "Biology"]}))];
        let spec = FilterSpec::default().with_subject("BIOLOGY");
        assert_eq!(filter(&roster, &spec).len(), 1);
        let spec = FilterSpec::default().with_subject("Bio");
        assert!(filter(&roster, &spec).is_empty());
    }

    #[test]
    fn location_matches_address_or_legacy_location() {
        let roster = vec![
            tutor("A", json!({"address": "12 MG Road, Pune"})),
            tutor("B", json!({"location": "Kothrud, Pune"})),
            tutor("C", json!({"fullName": "No address"})),
        ];
        let spec = FilterSpec::default().with_location(" pune ");
        assert_eq!(keys(&filter(&roster, &spec)), vec!["A", "B"]);
        let spec = FilterSpec::default().with_location("kothrud");
        assert_eq!(keys(&filter(&roster, &spec)), vec!["B"]);
    }

    #[test]
    fn missing_fields_fail_their_clause() {
        let roster = vec![tutor("E", json!({}))];
        assert!(filter(&roster, &FilterSpec::default().with_stream("12th Class")).is_empty());
        assert!(filter(&roster, &FilterSpec::default().with_subject("English")).is_empty());
        assert_eq!(filter(&roster, &FilterSpec::default()).len(), 1);
    }

    #[test]
    fn all_clauses_must_hold() {
        let roster = vec![
            tutor(
                "X",
                json!({
                    "teachingStreams": ["JEE Preparation"],
                    "subjectsTaught": ["Physics"],
                    "address": "Baner, Pune"
                }),
            ),
            tutor(
                "Y",
                json!({
                    "teachingStreams": ["JEE Preparation"],
                    "subjectsTaught": ["Chemistry"],
                    "address": "Baner, Pune"
                }),
            ),
        ];
        let spec = FilterSpec::new("JEE Preparation", "Physics", "baner");
        let hits = filter_refs(&roster, &spec);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "X");
    }
}
