//! Stored documents: a collection key plus a JSON body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field holding the identity key inside profile documents.
pub const USER_ID_FIELD: &str = "userId";

/// Field holding the contact email inside profile documents.
pub const EMAIL_FIELD: &str = "email";

/// A single record in a keyed collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Collection key the body is stored under.
    pub key: String,
    /// Raw stored body, normally a JSON object.
    pub body: Value,
}

impl Document {
    pub fn new(key: impl Into<String>, body: Value) -> Self {
        Self {
            key: key.into(),
            body,
        }
    }

    /// String value of a top-level field. Non-string values yield `None`.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    /// Whether a top-level field holds exactly `value` as a string.
    pub fn field_equals(&self, field: &str, value: &str) -> bool {
        self.str_field(field) == Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_equality_is_exact_and_string_only() {
        let doc = Document::new(
            "k1",
            json!({"userId": "uid-1", "email": "Asha@x.com", "age": 12}),
        );
        assert!(doc.field_equals(USER_ID_FIELD, "uid-1"));
        assert!(!doc.field_equals(EMAIL_FIELD, "asha@x.com"));
        assert!(!doc.field_equals("age", "12"));
        assert_eq!(doc.str_field("missing"), None);
    }

    #[test]
    fn non_object_body_has_no_fields() {
        let doc = Document::new("k2", json!("just a string"));
        assert_eq!(doc.str_field(USER_ID_FIELD), None);
    }
}
