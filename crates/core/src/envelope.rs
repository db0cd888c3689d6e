//! Response Envelope
//!
//! The uniform `{success, data | error}` JSON body returned to HTTP callers.
//! Field names are a compatibility contract with existing clients and must
//! not change.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Candidate {
    pub content: Content,
}

/// Canonical generated content: exactly one candidate with exactly one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResponseData {
    pub candidates: Vec<Candidate>,
}

impl ResponseData {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Content {
                    parts: vec![Part { text: text.into() }],
                },
            }],
        }
    }

    /// The generated text, if the data has the canonical shape.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .first()
            .map(|part| part.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(data: ResponseData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_wire_format() {
        let envelope = ResponseEnvelope::success(ResponseData::from_text("T"));
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"success":true,"data":{"candidates":[{"content":{"parts":[{"text":"T"}]}}]}}"#
        );
    }

    #[test]
    fn test_failure_wire_format() {
        let envelope = ResponseEnvelope::failure("Unsupported action: bogus");
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"success":false,"error":"Unsupported action: bogus"}"#
        );
    }

    #[test]
    fn test_text_accessor() {
        assert_eq!(ResponseData::from_text("hello").text(), Some("hello"));
        assert_eq!(ResponseData { candidates: vec![] }.text(), None);
    }
}
