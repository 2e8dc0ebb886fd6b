//! Input validation rules used by the registration flows.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::profile::{ProfileRecord, StudentProfile, TutorProfile};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$"
    )
    .expect("email pattern");
    static ref PHONE_RE: Regex = Regex::new(r"^[6-9]\d{9}$").expect("phone pattern");
    static ref PASSWORD_CHARS_RE: Regex =
        Regex::new(r"^[A-Za-z\d@$!%*#?&]{8,}$").expect("password pattern");
    static ref AADHAR_RE: Regex = Regex::new(r"^\d{12}$").expect("aadhar pattern");
    static ref PAN_RE: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("pan pattern");
    static ref NAME_RE: Regex = Regex::new(r"^[a-zA-Z\s\-.']+$").expect("name pattern");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern");
}

const SPECIAL_CHARS: &str = "@$!%*#?&";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Indian mobile number: ten digits starting with 6-9.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// At least eight allowed characters with at least one letter and one digit.
pub fn is_valid_password(password: &str) -> bool {
    PASSWORD_CHARS_RE.is_match(password)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn is_valid_aadhar(aadhar: &str) -> bool {
    AADHAR_RE.is_match(aadhar)
}

pub fn is_valid_pan(pan: &str) -> bool {
    PAN_RE.is_match(pan)
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name) && name.chars().count() >= 2
}

pub fn is_valid_age(age: &str) -> bool {
    matches!(age.trim().parse::<i64>(), Ok(5..=100))
}

pub fn is_valid_experience(years: &str) -> bool {
    matches!(years.trim().parse::<i64>(), Ok(0..=50))
}

pub fn is_valid_budget(min: &str, max: &str) -> bool {
    match (min.trim().parse::<i64>(), max.trim().parse::<i64>()) {
        (Ok(min), Ok(max)) => min >= 0 && max >= 0 && min <= max && max <= 100_000,
        _ => false,
    }
}

pub fn is_valid_address(address: &str) -> bool {
    (10..=200).contains(&address.chars().count())
}

pub fn is_valid_institution_name(institution: &str) -> bool {
    (3..=100).contains(&institution.chars().count())
}

/// Trim and collapse runs of whitespace into single spaces.
pub fn sanitize_text(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    Missing,
    TooShort,
    VeryWeak,
    Weak,
    Good,
    Strong,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        if password.is_empty() {
            return PasswordStrength::Missing;
        }
        if password.chars().count() < 8 {
            return PasswordStrength::TooShort;
        }
        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
        match (has_letter, has_digit, has_special) {
            (true, true, true) => PasswordStrength::Strong,
            (true, true, false) => PasswordStrength::Good,
            (true, false, _) | (false, true, _) => PasswordStrength::Weak,
            (false, false, _) => PasswordStrength::VeryWeak,
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PasswordStrength::Missing => "Password is required",
            PasswordStrength::TooShort => "Password must be at least 8 characters long",
            PasswordStrength::VeryWeak => "Very weak password",
            PasswordStrength::Weak => "Weak password",
            PasswordStrength::Good => "Good password",
            PasswordStrength::Strong => "Strong password",
        })
    }
}

// ---------------------------------------------------------------------------
// Whole-profile checks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Default)]
struct Checks(Vec<FieldError>);

impl Checks {
    fn require(&mut self, field: &'static str, value: Option<&str>, valid: fn(&str) -> bool, message: &str) {
        let ok = value.map(str::trim).is_some_and(|v| !v.is_empty() && valid(v));
        if !ok {
            self.0.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    }
}

/// Every failing field of a tutor profile, in form order.
pub fn validate_tutor(tutor: &TutorProfile) -> Vec<FieldError> {
    let mut checks = Checks::default();
    let age = tutor.age.to_string();
    let experience = tutor.experience_years().to_string();

    checks.require("fullName", tutor.base.full_name.as_deref(), is_valid_name, "Enter a valid name");
    checks.require("email", tutor.base.email.as_deref(), is_valid_email, "Enter a valid email address");
    checks.require("phoneNumber", tutor.base.phone(), is_valid_phone, "Enter a valid 10-digit mobile number");
    checks.require("address", tutor.base.address.as_deref(), is_valid_address, "Address must be 10-200 characters");
    checks.require("age", Some(age.as_str()), is_valid_age, "Age must be between 5 and 100");
    checks.require("institution", tutor.institution.as_deref(), is_valid_institution_name, "Institution must be 3-100 characters");
    checks.require("yearsOfExperience", Some(experience.as_str()), is_valid_experience, "Experience must be between 0 and 50 years");
    if tutor.subject_tags().is_empty() {
        checks.0.push(FieldError {
            field: "subjectsTaught",
            message: "Select at least one subject".to_string(),
        });
    }
    checks.0
}

/// Every failing field of a student profile, in form order.
pub fn validate_student(student: &StudentProfile) -> Vec<FieldError> {
    let mut checks = Checks::default();
    let age = student.age.to_string();

    checks.require("fullName", student.base.full_name.as_deref(), is_valid_name, "Enter a valid name");
    checks.require("email", student.base.email.as_deref(), is_valid_email, "Enter a valid email address");
    checks.require("phoneNumber", student.base.phone(), is_valid_phone, "Enter a valid 10-digit mobile number");
    checks.require("address", student.base.address.as_deref(), is_valid_address, "Address must be 10-200 characters");
    checks.require("age", Some(age.as_str()), is_valid_age, "Age must be between 5 and 100");
    checks.require("schoolName", student.school_name.as_deref(), is_valid_institution_name, "School name must be 3-100 characters");
    if !is_valid_budget(&student.min_budget.to_string(), &student.max_budget.to_string()) {
        checks.0.push(FieldError {
            field: "budget",
            message: "Budget must satisfy 0 <= min <= max <= 100000".to_string(),
        });
    }
    checks.0
}
