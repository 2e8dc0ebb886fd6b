//! Filter specifications and the options offered for them.

use ht_core::tags::eq_ignore_case;
use serde::Serialize;

/// Stream value meaning "any stream".
pub const ALL_STREAMS: &str = "All Streams";

/// Subject value meaning "any subject".
pub const ALL_SUBJECTS: &str = "All Subjects";

pub const STREAM_OPTIONS: [&str; 6] = [
    ALL_STREAMS,
    "NEET Preparation",
    "JEE Preparation",
    "12th Class",
    "10th Class",
    "Primary Education",
];

pub const SUBJECT_OPTIONS: [&str; 8] = [
    ALL_SUBJECTS,
    "Physics",
    "Chemistry",
    "Mathematics",
    "Biology",
    "English",
    "History",
    "Geography",
];

/// What a roster is filtered by. The default constrains nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    stream: String,
    subject: String,
    location_query: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            stream: ALL_STREAMS.to_string(),
            subject: ALL_SUBJECTS.to_string(),
            location_query: String::new(),
        }
    }
}

fn constraint<'a>(value: &'a str, sentinel: &str) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() || eq_ignore_case(value, sentinel) {
        None
    } else {
        Some(value)
    }
}

impl FilterSpec {
    pub fn new(
        stream: impl Into<String>,
        subject: impl Into<String>,
        location_query: impl AsRef<str>,
    ) -> Self {
        Self {
            stream: stream.into(),
            subject: subject.into(),
            location_query: location_query.as_ref().trim().to_string(),
        }
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = stream.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_location(mut self, query: impl AsRef<str>) -> Self {
        self.location_query = query.as_ref().trim().to_string();
        self
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn location_query(&self) -> &str {
        &self.location_query
    }

    /// Stream to require, or `None` for the sentinel.
    pub fn stream_constraint(&self) -> Option<&str> {
        constraint(&self.stream, ALL_STREAMS)
    }

    /// Subject to require, or `None` for the sentinel.
    pub fn subject_constraint(&self) -> Option<&str> {
        constraint(&self.subject, ALL_SUBJECTS)
    }

    pub fn location_constraint(&self) -> Option<&str> {
        Some(self.location_query.as_str()).filter(|q| !q.is_empty())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.stream_constraint().is_none()
            && self.subject_constraint().is_none()
            && self.location_constraint().is_none()
    }
}
