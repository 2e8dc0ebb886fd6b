//! Profile models: the stored shape of student and tutor records.
//!
//! Records have drifted over time: numbers stored as strings, renamed fields,
//! list fields next to older comma-joined strings. Decoding is lenient about
//! those shapes and strict about everything else, so a record that still
//! fails to decode is reported as malformed.

mod card;
mod lenient;
mod student;
mod tutor;

pub use card::ProfileCard;
pub use student::{BudgetRange, StudentProfile};
pub use tutor::{IdentityDocument, IdentityDocumentKind, TutorProfile, DEFAULT_RATING};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display_name::derive_display_name;
use crate::document::Document;
use crate::photo::PhotoRef;
use crate::tags::Tags;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    /// Collection the role's profiles live in unless configured otherwise.
    pub fn default_collection(self) -> &'static str {
        match self {
            Role::Student => "students",
            Role::Teacher => "teachers",
        }
    }

    /// Name shown when nothing better can be derived.
    pub fn placeholder_name(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Teacher => f.write_str("teacher"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "students" => Ok(Role::Student),
            "teacher" | "teachers" | "tutor" | "tutors" => Ok(Role::Teacher),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("malformed {role} record {key}: {message}")]
    Malformed {
        role: Role,
        key: String,
        message: String,
    },
    #[error("serialization error: {0}")]
    Serialization(String),
}

// ---------------------------------------------------------------------------
// Shared base
// ---------------------------------------------------------------------------

/// Fields common to every profile record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileBase {
    /// Identity key issued at registration.
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    /// Older records store the phone under this name.
    #[serde(rename = "phone")]
    pub legacy_phone: Option<String>,
    pub address: Option<String>,
    /// Photo field written by the tutor registration flow.
    pub profile_image_url: Option<String>,
    /// Photo field written by the student registration flow.
    pub profile_photo_url: Option<String>,
    pub verified: bool,
    pub user_type: Option<String>,
    /// Epoch milliseconds or an RFC 3339 string, depending on record age.
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub created_at: Option<String>,
}

impl ProfileBase {
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone_number.as_deref()).or_else(|| non_blank(self.legacy_phone.as_deref()))
    }

    pub fn photo(&self) -> Option<PhotoRef> {
        non_blank(self.profile_image_url.as_deref())
            .or_else(|| non_blank(self.profile_photo_url.as_deref()))
            .and_then(PhotoRef::classify)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = non_blank(self.created_at.as_deref())?;
        if let Ok(millis) = raw.parse::<i64>() {
            return Utc.timestamp_millis_opt(millis).single();
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Record trait
// ---------------------------------------------------------------------------

/// A typed profile stored as a document in its role's collection.
pub trait ProfileRecord: Sized + Serialize + DeserializeOwned + Send + Sync {
    const ROLE: Role;

    fn base(&self) -> &ProfileBase;

    /// Document key the record was read from. Empty for unsaved records.
    fn key(&self) -> &str;

    fn set_key(&mut self, key: String);

    /// Subjects shown on the profile.
    fn subject_tags(&self) -> Tags;

    /// Teaching streams shown on the profile.
    fn stream_tags(&self) -> Tags;

    /// Identity key: the `userId` field, else the document key.
    fn identity_key(&self) -> &str {
        non_blank(self.base().user_id.as_deref()).unwrap_or_else(|| self.key())
    }

    /// Name to display, falling back to the email-derived name.
    fn display_name(&self) -> String {
        derive_display_name(
            self.base().full_name.as_deref(),
            self.base().email.as_deref(),
            Self::ROLE,
        )
    }

    /// Decode a stored document, stamping its key onto the record.
    fn from_document(doc: &Document) -> Result<Self, ProfileError> {
        let mut record: Self =
            serde_json::from_value(doc.body.clone()).map_err(|e| ProfileError::Malformed {
                role: Self::ROLE,
                key: doc.key.clone(),
                message: e.to_string(),
            })?;
        record.set_key(doc.key.clone());
        Ok(record)
    }

    /// Encode the record as a document body.
    fn to_body(&self) -> Result<serde_json::Value, ProfileError> {
        serde_json::to_value(self).map_err(|e| ProfileError::Serialization(e.to_string()))
    }
}

/// Either kind of profile, for callers that handle both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Profile {
    Student(StudentProfile),
    Teacher(TutorProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Student(_) => Role::Student,
            Profile::Teacher(_) => Role::Teacher,
        }
    }

    pub fn base(&self) -> &ProfileBase {
        match self {
            Profile::Student(s) => &s.base,
            Profile::Teacher(t) => &t.base,
        }
    }

    pub fn from_document(role: Role, doc: &Document) -> Result<Self, ProfileError> {
        match role {
            Role::Student => StudentProfile::from_document(doc).map(Profile::Student),
            Role::Teacher => TutorProfile::from_document(doc).map(Profile::Teacher),
        }
    }
}
