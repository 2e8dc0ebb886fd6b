//! Student profiles.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::{ProfileBase, ProfileRecord, Role};
use crate::tags::Tags;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(skip)]
    pub key: String,

    #[serde(flatten)]
    pub base: ProfileBase,

    #[serde(deserialize_with = "lenient::count")]
    pub age: u32,
    pub gender: Option<String>,
    pub current_class: Option<String>,
    pub board: Option<String>,
    pub school_name: Option<String>,
    pub parent_contact: Option<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub subjects_needed: Option<Vec<String>>,
    /// Older records store the subject list under this name.
    #[serde(rename = "subjects", deserialize_with = "lenient::string_list")]
    pub legacy_subjects: Option<Vec<String>>,
    /// Oldest records store subjects as one comma-joined string.
    #[serde(rename = "subjectsTaught")]
    pub legacy_subjects_taught: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub tuition_streams: Option<Vec<String>>,

    pub preferred_teacher_gender: Option<String>,
    pub preferred_time_slot: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub min_budget: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub max_budget: u32,
    pub additional_requirements: Option<String>,
}

/// Monthly budget a student is willing to pay. `min <= max` is expected but
/// not enforced by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

impl BudgetRange {
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, amount: u32) -> bool {
        self.is_ordered() && (self.min..=self.max).contains(&amount)
    }
}

impl StudentProfile {
    /// Budget range, or `None` when neither bound was ever set.
    pub fn budget(&self) -> Option<BudgetRange> {
        if self.min_budget == 0 && self.max_budget == 0 {
            return None;
        }
        Some(BudgetRange {
            min: self.min_budget,
            max: self.max_budget,
        })
    }
}

impl ProfileRecord for StudentProfile {
    const ROLE: Role = Role::Student;

    fn base(&self) -> &ProfileBase {
        &self.base
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }

    /// `subjectsNeeded`, else the legacy `subjects` list, merged with the
    /// legacy comma-joined `subjectsTaught` string.
    fn subject_tags(&self) -> Tags {
        let list = self
            .subjects_needed
            .as_deref()
            .or(self.legacy_subjects.as_deref());
        Tags::merge(list, self.legacy_subjects_taught.as_deref())
    }

    fn stream_tags(&self) -> Tags {
        Tags::from_list(self.tuition_streams.as_deref())
    }
}
