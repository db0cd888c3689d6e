//! Request Validator
//!
//! Checks presence only: every required field of the resolved action must be
//! in the payload. Types, ranges and content are left to the provider.

use crate::{action::Action, catalog::ActionSpec, payload::RequestPayload};

/// A known action was requested with one or more required fields absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required field(s) for {action}: {}", .missing_fields.join(", "))]
pub struct ValidationError {
    pub action: Action,
    pub missing_fields: Vec<String>,
}

/// Verifies that every required field of `spec` is present in `payload`.
///
/// The error lists all missing fields in catalog order, not just the first.
pub fn validate(spec: &ActionSpec, payload: &RequestPayload) -> Result<(), ValidationError> {
    let missing_fields: Vec<String> = spec
        .required_fields
        .iter()
        .filter(|field| !payload.contains(field))
        .map(|field| field.to_string())
        .collect();

    if missing_fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            action: spec.action,
            missing_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateCatalog;
    use serde_json::{Value, json};

    fn payload(value: Value) -> RequestPayload {
        match value {
            Value::Object(map) => RequestPayload::new(map),
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_validate_lists_every_missing_field() {
        let spec = TemplateCatalog::standard()
            .get(Action::AnalyzeInterview)
            .unwrap();
        let err = validate(spec, &payload(json!({ "question": "Why Rust?" }))).unwrap_err();

        assert_eq!(err.action, Action::AnalyzeInterview);
        assert_eq!(err.missing_fields, vec!["jobRole", "answer"]);
        assert_eq!(
            err.to_string(),
            "Missing required field(s) for analyze_interview: jobRole, answer"
        );
    }

    #[test]
    fn test_validate_ignores_optional_and_extra_fields() {
        let spec = TemplateCatalog::standard()
            .get(Action::GenerateInterviewQuestions)
            .unwrap();
        let ok = payload(json!({
            "experience": 2,
            "jobRole": "QA",
            "techStack": "Cypress",
            "unrelated": "ignored"
        }));
        assert!(validate(spec, &ok).is_ok());
    }

    #[test]
    fn test_validate_treats_null_as_missing() {
        let spec = TemplateCatalog::standard().get(Action::ExplainCode).unwrap();
        let err = validate(spec, &payload(json!({ "code": null }))).unwrap_err();
        assert_eq!(err.missing_fields, vec!["code"]);
    }
}
