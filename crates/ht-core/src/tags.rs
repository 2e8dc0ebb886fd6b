//! Tag lists: one normalized view over a structured list field and its
//! legacy comma-joined string counterpart.
//!
//! Merge rule: structured entries first (stored order), then legacy entries
//! split on `,`. Entries are trimmed for display, blanks dropped, and an entry
//! equal to an earlier one (ignoring case) is folded into it instead of being
//! appended. Matching stays exact on the stored structured entry and
//! substring-based on the whole legacy string.

use serde::{Serialize, Serializer};

/// Case-insensitive equality, matching on lowercase forms.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    value: String,
    /// The structured entry exactly as stored, untrimmed.
    stored: Option<String>,
    legacy: bool,
}

impl Tag {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Came from the structured list field.
    pub fn is_structured(&self) -> bool {
        self.stored.is_some()
    }

    /// Came from the legacy comma-joined string.
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// Exact (case-insensitive) match on the stored entry for structured
    /// tags, substring match for legacy tags.
    pub fn matches(&self, query: &str) -> bool {
        self.stored
            .as_deref()
            .is_some_and(|stored| eq_ignore_case(stored, query))
            || (self.legacy && contains_ignore_case(&self.value, query))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: Vec<Tag>,
    legacy: Option<String>,
}

impl Tags {
    /// Build from a structured list only.
    pub fn from_list(list: Option<&[String]>) -> Self {
        Self::merge(list, None)
    }

    /// Build from a structured list and a legacy comma-joined string.
    pub fn merge(list: Option<&[String]>, legacy: Option<&str>) -> Self {
        let mut tags = Tags::default();
        for entry in list.unwrap_or_default() {
            tags.push(entry, true);
        }
        if let Some(joined) = legacy {
            for entry in joined.split(',') {
                tags.push(entry, false);
            }
            tags.legacy = Some(joined.to_string());
        }
        tags
    }

    fn push(&mut self, raw: &str, structured: bool) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }
        match self.tags.iter_mut().find(|t| eq_ignore_case(&t.value, value)) {
            Some(existing) if structured => {
                existing.stored.get_or_insert_with(|| raw.to_string());
            }
            Some(existing) => existing.legacy = true,
            None => self.tags.push(Tag {
                value: value.to_string(),
                stored: structured.then(|| raw.to_string()),
                legacy: !structured,
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn values(&self) -> Vec<&str> {
        self.tags.iter().map(Tag::value).collect()
    }

    /// The legacy comma-joined string as stored.
    pub fn legacy(&self) -> Option<&str> {
        self.legacy.as_deref()
    }

    /// Whether any structured entry equals `query` ignoring case.
    pub fn contains(&self, query: &str) -> bool {
        self.tags
            .iter()
            .filter_map(|t| t.stored.as_deref())
            .any(|stored| eq_ignore_case(stored, query))
    }

    /// Whether a structured entry equals `query`, or the whole legacy string
    /// contains it, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        self.contains(query)
            || self
                .legacy
                .as_deref()
                .is_some_and(|joined| contains_ignore_case(joined, query))
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tags.iter().map(Tag::value))
    }
}
