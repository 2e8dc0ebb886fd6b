//! ht-filter: Pure, order-preserving filtering of tutor rosters.

pub mod engine;
pub mod roster;
pub mod spec;

pub use engine::{filter, filter_refs, matches};
pub use roster::RosterView;
pub use spec::{FilterSpec, ALL_STREAMS, ALL_SUBJECTS, STREAM_OPTIONS, SUBJECT_OPTIONS};
