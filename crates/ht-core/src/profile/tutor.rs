//! Tutor profiles.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::{non_blank, ProfileBase, ProfileRecord, Role};
use crate::tags::Tags;

/// Rating shown for tutors that have not been rated.
pub const DEFAULT_RATING: &str = "4.5";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TutorProfile {
    #[serde(skip)]
    pub key: String,

    #[serde(flatten)]
    pub base: ProfileBase,

    pub highest_qualification: Option<String>,
    /// Older records store the qualification under this name.
    #[serde(rename = "qualification")]
    pub legacy_qualification: Option<String>,
    pub institution: Option<String>,

    #[serde(deserialize_with = "lenient::count")]
    pub years_of_experience: u32,
    /// Older records store experience as free text or a bare number.
    #[serde(rename = "experience", deserialize_with = "lenient::string_or_number")]
    pub legacy_experience: Option<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub subjects_taught: Option<Vec<String>>,
    /// Older records store subjects as one comma-joined string.
    #[serde(rename = "subjects")]
    pub legacy_subjects: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub teaching_streams: Option<Vec<String>>,
    /// Older records store a free-text location next to the address.
    #[serde(rename = "location")]
    pub legacy_location: Option<String>,

    #[serde(deserialize_with = "lenient::string_or_number")]
    pub rating: Option<String>,
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub hourly_rate: Option<String>,
    pub bio: Option<String>,
    pub availability: Option<String>,

    #[serde(deserialize_with = "lenient::count")]
    pub age: u32,
    pub gender: Option<String>,

    pub aadhar_card_url: Option<String>,
    pub pan_card_url: Option<String>,
    pub degree_certificate_url: Option<String>,
    #[serde(rename = "aadhar_image")]
    pub aadhar_image: Option<String>,
    #[serde(rename = "pan_image")]
    pub pan_image: Option<String>,
    #[serde(rename = "degree_image")]
    pub degree_image: Option<String>,
    pub documents_verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityDocumentKind {
    Aadhar,
    Pan,
    DegreeCertificate,
}

/// An identity document attached to a tutor profile, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityDocument<'a> {
    pub kind: IdentityDocumentKind,
    pub payload: &'a str,
}

impl TutorProfile {
    pub fn qualification(&self) -> Option<&str> {
        non_blank(self.highest_qualification.as_deref())
            .or_else(|| non_blank(self.legacy_qualification.as_deref()))
    }

    /// Years of experience, reading the legacy text field when the integer
    /// field is unset. Legacy text like "5 years" yields its leading number.
    pub fn experience_years(&self) -> u32 {
        if self.years_of_experience > 0 {
            return self.years_of_experience;
        }
        self.legacy_experience
            .as_deref()
            .map(str::trim)
            .and_then(|text| {
                let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().ok()
            })
            .unwrap_or(0)
    }

    pub fn rating(&self) -> &str {
        non_blank(self.rating.as_deref()).unwrap_or(DEFAULT_RATING)
    }

    pub fn rating_value(&self) -> Option<f32> {
        self.rating().trim().parse().ok()
    }

    /// Address followed by the legacy location, skipping blanks.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        [
            self.base.address.as_deref(),
            self.legacy_location.as_deref(),
        ]
        .into_iter()
        .filter_map(non_blank)
    }

    /// Identity documents present on the record.
    pub fn identity_documents(&self) -> Vec<IdentityDocument<'_>> {
        [
            (
                IdentityDocumentKind::Aadhar,
                &self.aadhar_card_url,
                &self.aadhar_image,
            ),
            (IdentityDocumentKind::Pan, &self.pan_card_url, &self.pan_image),
            (
                IdentityDocumentKind::DegreeCertificate,
                &self.degree_certificate_url,
                &self.degree_image,
            ),
        ]
        .into_iter()
        .filter_map(|(kind, current, legacy)| {
            non_blank(current.as_deref())
                .or_else(|| non_blank(legacy.as_deref()))
                .map(|payload| IdentityDocument { kind, payload })
        })
        .collect()
    }
}

impl ProfileRecord for TutorProfile {
    const ROLE: Role = Role::Teacher;

    fn base(&self) -> &ProfileBase {
        &self.base
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }

    fn subject_tags(&self) -> Tags {
        Tags::merge(
            self.subjects_taught.as_deref(),
            self.legacy_subjects.as_deref(),
        )
    }

    fn stream_tags(&self) -> Tags {
        Tags::from_list(self.teaching_streams.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use serde_json::json;

    #[test]
    fn decodes_registration_record() {
        let doc = Document::new(
            "uid-42",
            json!({
                "userId": "uid-42",
                "email": "priya@x.com",
                "fullName": "Priya Sharma",
                "phoneNumber": "9876543210",
                "address": "12 MG Road, Pune",
                "highestQualification": "M.Sc",
                "institution": "Fergusson College",
                "yearsOfExperience": 6,
                "subjectsTaught": ["Physics", "Chemistry"],
                "teachingStreams": ["JEE Preparation"],
                "aadharCardUrl": "QUFE",
                "verified": true
            }),
        );
        let tutor = TutorProfile::from_document(&doc).unwrap();
        assert_eq!(tutor.key, "uid-42");
        assert_eq!(tutor.qualification(), Some("M.Sc"));
        assert_eq!(tutor.experience_years(), 6);
        assert_eq!(tutor.rating(), DEFAULT_RATING);
        assert!(tutor.base.verified);
        assert_eq!(tutor.subject_tags().values(), vec!["Physics", "Chemistry"]);
        assert_eq!(
            tutor.identity_documents(),
            vec![IdentityDocument {
                kind: IdentityDocumentKind::Aadhar,
                payload: "QUFE"
            }]
        );
    }

    #[test]
    fn decodes_legacy_record() {
        let doc = Document::new(
            "-Nx91",
            json!({
                "fullName": "Rahul",
                "subjects": "Physics, Chemistry",
                "experience": "5 years",
                "qualification": "B.Tech",
                "location": "Kothrud",
                "hourlyRate": 400,
                "rating": 4.8,
                "pan_image": "UEFO"
            }),
        );
        let tutor = TutorProfile::from_document(&doc).unwrap();
        assert_eq!(tutor.subjects_taught, None);
        assert_eq!(tutor.experience_years(), 5);
        assert_eq!(tutor.qualification(), Some("B.Tech"));
        assert_eq!(tutor.hourly_rate.as_deref(), Some("400"));
        assert_eq!(tutor.rating_value(), Some(4.8));
        assert_eq!(tutor.locations().collect::<Vec<_>>(), vec!["Kothrud"]);
        assert!(tutor.subject_tags().matches("physics"));
        assert_eq!(tutor.identity_documents()[0].kind, IdentityDocumentKind::Pan);
        assert_eq!(tutor.identity_key(), "-Nx91");
    }

    #[test]
    fn wrong_field_types_are_malformed() {
        let doc = Document::new("bad", json!({"subjectsTaught": 12}));
        let err = TutorProfile::from_document(&doc).unwrap_err();
        assert!(err.to_string().contains("malformed teacher record bad"));

        let doc = Document::new("bad2", json!("not an object"));
        assert!(TutorProfile::from_document(&doc).is_err());
    }

    #[test]
    fn body_round_trips_through_document() {
        let tutor = TutorProfile {
            key: "uid-1".into(),
            base: ProfileBase {
                user_id: Some("uid-1".into()),
                full_name: Some("Kavya".into()),
                ..Default::default()
            },
            teaching_streams: Some(vec!["NEET Preparation".into()]),
            years_of_experience: 3,
            ..Default::default()
        };
        let body = tutor.to_body().unwrap();
        assert_eq!(body["userId"], "uid-1");
        assert_eq!(body["teachingStreams"], json!(["NEET Preparation"]));
        let back = TutorProfile::from_document(&Document::new("uid-1", body)).unwrap();
        assert_eq!(back, tutor);
    }
}
