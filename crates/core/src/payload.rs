//! Request Payload
//!
//! The flat field map a caller supplies alongside an action. Both HTTP
//! payload conventions are reduced to this type before dispatch.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// A required field was absent (or `null`) when a template asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPayload {
    fields: Map<String, Value>,
}

impl RequestPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Whether the field is present with a non-null value.
    pub fn contains(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(value) if !value.is_null())
    }

    /// Returns the value of a field as it should appear inside a prompt.
    ///
    /// Strings are used verbatim; numbers, booleans and structured values
    /// use their compact JSON text. `null` is treated as absent.
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Like [`RequestPayload::text`], but reports the missing field by name.
    pub fn require(&self, field: &str) -> Result<Cow<'_, str>, MissingField> {
        self.text(field)
            .ok_or_else(|| MissingField(field.to_string()))
    }

    /// Sets a field only if it is absent or `null`.
    pub fn insert_default(&mut self, field: &str, value: &str) {
        if !self.contains(field) {
            self.fields
                .insert(field.to_string(), Value::String(value.to_string()));
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for RequestPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RequestPayload {
        match value {
            Value::Object(map) => RequestPayload::new(map),
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_text_renders_scalars() {
        let p = payload(json!({
            "topic": "Rust",
            "experience": 3,
            "remote": true,
            "ratio": 0.5
        }));
        assert_eq!(p.text("topic").as_deref(), Some("Rust"));
        assert_eq!(p.text("experience").as_deref(), Some("3"));
        assert_eq!(p.text("remote").as_deref(), Some("true"));
        assert_eq!(p.text("ratio").as_deref(), Some("0.5"));
        assert_eq!(p.text("absent"), None);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let p = payload(json!({ "topic": null }));
        assert!(!p.contains("topic"));
        assert_eq!(p.require("topic"), Err(MissingField("topic".to_string())));
    }

    #[test]
    fn test_empty_string_is_present() {
        let p = payload(json!({ "text": "" }));
        assert!(p.contains("text"));
        assert_eq!(p.require("text").unwrap(), "");
    }

    #[test]
    fn test_insert_default_keeps_caller_value() {
        let mut p = payload(json!({ "questionCount": 10 }));
        p.insert_default("questionCount", "5");
        assert_eq!(p.text("questionCount").as_deref(), Some("10"));

        let mut p = payload(json!({ "questionCount": null }));
        p.insert_default("questionCount", "5");
        assert_eq!(p.text("questionCount").as_deref(), Some("5"));
    }
}
