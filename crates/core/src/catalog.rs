//! Template Catalog
//!
//! A fixed table mapping every [`Action`] to its required fields, defaulted
//! optional fields, prompt template and generation profile. The table is a
//! `static` and never changes at runtime, so it is shared between requests
//! without locking.

use crate::{
    action::Action,
    payload::RequestPayload,
    templates::{self, RenderFn},
    validator::ValidationError,
};
use serde::Serialize;
use std::borrow::Cow;
use utoipa::ToSchema;

/// Sampling parameters sent alongside a rendered prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationProfile {
    /// In `[0, 1]`.
    pub temperature: f64,
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl GenerationProfile {
    const fn new(temperature: f64, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            max_output_tokens,
            top_k: None,
            top_p: None,
        }
    }

    const fn with_sampling(mut self, top_k: u32, top_p: f64) -> Self {
        self.top_k = Some(top_k);
        self.top_p = Some(top_p);
        self
    }
}

/// An optional field and the value used when the caller omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefault {
    pub field: &'static str,
    pub value: &'static str,
}

/// Everything the dispatcher needs to know about one action.
pub struct ActionSpec {
    pub action: Action,
    pub required_fields: &'static [&'static str],
    pub defaults: &'static [FieldDefault],
    pub profile: GenerationProfile,
    render: RenderFn,
}

impl ActionSpec {
    /// Renders the prompt for this action, filling in defaults first.
    ///
    /// Fails only when a required field is absent; lookup of the action itself
    /// has already succeeded by the time this is called.
    pub fn render(&self, payload: &RequestPayload) -> Result<String, ValidationError> {
        let payload = if self.defaults.is_empty() {
            Cow::Borrowed(payload)
        } else {
            let mut owned = payload.clone();
            for default in self.defaults {
                owned.insert_default(default.field, default.value);
            }
            Cow::Owned(owned)
        };

        (self.render)(&payload).map_err(|missing| ValidationError {
            action: self.action,
            missing_fields: vec![missing.0],
        })
    }

    pub fn describe(&self) -> ActionDescriptor {
        ActionDescriptor {
            action: self.action,
            required_fields: self.required_fields.iter().map(|f| f.to_string()).collect(),
            optional_fields: self
                .defaults
                .iter()
                .map(|d| OptionalField {
                    name: d.field.to_string(),
                    default: d.value.to_string(),
                })
                .collect(),
            profile: self.profile,
        }
    }
}

impl std::fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSpec")
            .field("action", &self.action)
            .field("required_fields", &self.required_fields)
            .field("defaults", &self.defaults)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

/// Public view of an [`ActionSpec`], served by the catalog listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub action: Action,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<OptionalField>,
    pub profile: GenerationProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OptionalField {
    pub name: String,
    pub default: String,
}

pub struct TemplateCatalog {
    specs: &'static [ActionSpec],
}

static STANDARD: TemplateCatalog = TemplateCatalog {
    specs: &[
        ActionSpec {
            action: Action::GenerateCourse,
            required_fields: &["topic", "purpose", "difficulty"],
            defaults: &[],
            profile: GenerationProfile::new(0.7, 8192).with_sampling(40, 0.95),
            render: templates::generate_course,
        },
        ActionSpec {
            action: Action::GenerateInterviewQuestions,
            required_fields: &["experience", "jobRole", "techStack"],
            defaults: &[FieldDefault {
                field: "questionCount",
                value: "5",
            }],
            profile: GenerationProfile::new(0.7, 2048),
            render: templates::generate_interview_questions,
        },
        ActionSpec {
            action: Action::AnalyzeInterview,
            required_fields: &["jobRole", "question", "answer"],
            defaults: &[],
            profile: GenerationProfile::new(0.3, 2048),
            render: templates::analyze_interview,
        },
        ActionSpec {
            action: Action::AnalyzeSpeech,
            required_fields: &["jobRole", "transcript"],
            defaults: &[],
            profile: GenerationProfile::new(0.3, 2048),
            render: templates::analyze_speech,
        },
        ActionSpec {
            action: Action::GenerateFlashcards,
            required_fields: &["topic", "purpose", "difficulty"],
            defaults: &[],
            profile: GenerationProfile::new(0.7, 4096),
            render: templates::generate_flashcards,
        },
        ActionSpec {
            action: Action::SummarizeText,
            required_fields: &["text"],
            defaults: &[],
            profile: GenerationProfile::new(0.5, 1024),
            render: templates::summarize_text,
        },
        ActionSpec {
            action: Action::ExplainCode,
            required_fields: &["code"],
            defaults: &[],
            profile: GenerationProfile::new(0.6, 2048),
            render: templates::explain_code,
        },
        ActionSpec {
            action: Action::CustomContent,
            required_fields: &["prompt"],
            defaults: &[],
            profile: GenerationProfile::new(0.7, 4096),
            render: templates::custom_content,
        },
    ],
};

impl TemplateCatalog {
    /// The catalog of every supported action.
    pub fn standard() -> &'static TemplateCatalog {
        &STANDARD
    }

    /// Resolves an action by its wire name.
    pub fn lookup(&self, name: &str) -> Option<&ActionSpec> {
        self.specs.iter().find(|spec| spec.action.as_str() == name)
    }

    pub fn get(&self, action: Action) -> Option<&ActionSpec> {
        self.specs.iter().find(|spec| spec.action == action)
    }

    pub fn specs(&self) -> impl Iterator<Item = &ActionSpec> {
        self.specs.iter()
    }

    pub fn describe(&self) -> Vec<ActionDescriptor> {
        self.specs.iter().map(ActionSpec::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn payload_with(fields: &[&str]) -> RequestPayload {
        let map: Map<String, Value> = fields
            .iter()
            .map(|f| (f.to_string(), Value::String(format!("<{f}-value>"))))
            .collect();
        RequestPayload::new(map)
    }

    #[test]
    fn test_every_action_has_exactly_one_spec() {
        let catalog = TemplateCatalog::standard();
        assert_eq!(catalog.specs().count(), Action::ALL.len());
        for action in Action::ALL {
            let spec = catalog.get(action).expect("spec for action");
            assert_eq!(spec.action, action);
            assert!(std::ptr::eq(catalog.lookup(action.as_str()).unwrap(), spec));
        }
    }

    #[test]
    fn test_render_with_required_fields_contains_every_value() {
        for spec in TemplateCatalog::standard().specs() {
            let payload = payload_with(spec.required_fields);
            let prompt = spec.render(&payload).unwrap();
            assert!(!prompt.is_empty(), "{} rendered empty", spec.action);
            for field in spec.required_fields {
                assert!(
                    prompt.contains(&format!("<{field}-value>")),
                    "{} prompt is missing {field}",
                    spec.action
                );
            }
        }
    }

    #[test]
    fn test_profiles_are_in_range() {
        for spec in TemplateCatalog::standard().specs() {
            assert!((0.0..=1.0).contains(&spec.profile.temperature));
            assert!(spec.profile.max_output_tokens > 0);
        }
    }

    #[test]
    fn test_profile_table() {
        let catalog = TemplateCatalog::standard();
        let expected = [
            ("generate_course", 0.7, 8192),
            ("generate_interview_questions", 0.7, 2048),
            ("analyze_interview", 0.3, 2048),
            ("analyze_speech", 0.3, 2048),
            ("generate_flashcards", 0.7, 4096),
            ("summarize_text", 0.5, 1024),
            ("explain_code", 0.6, 2048),
            ("custom_content", 0.7, 4096),
        ];
        for (name, temperature, max_tokens) in expected {
            let profile = catalog.lookup(name).unwrap().profile;
            assert_eq!(profile.temperature, temperature, "{name}");
            assert_eq!(profile.max_output_tokens, max_tokens, "{name}");
        }

        let course = catalog.get(Action::GenerateCourse).unwrap().profile;
        assert_eq!(course.top_k, Some(40));
        assert_eq!(course.top_p, Some(0.95));
        assert_eq!(catalog.get(Action::SummarizeText).unwrap().profile.top_k, None);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(TemplateCatalog::standard().lookup("bogus").is_none());
    }

    #[test]
    fn test_interview_questions_default_count() {
        let spec = TemplateCatalog::standard()
            .get(Action::GenerateInterviewQuestions)
            .unwrap();
        let payload = match json!({
            "experience": "3",
            "jobRole": "Backend Engineer",
            "techStack": "Go, Postgres"
        }) {
            Value::Object(map) => RequestPayload::new(map),
            _ => unreachable!(),
        };

        let prompt = spec.render(&payload).unwrap();
        assert!(prompt.contains(
            "Generate 5 interview questions for a 3 years experienced Backend Engineer"
        ));
        assert!(prompt.contains("with expertise in Go, Postgres."));
    }

    #[test]
    fn test_render_reports_missing_field() {
        let spec = TemplateCatalog::standard().get(Action::SummarizeText).unwrap();
        let err = spec.render(&RequestPayload::default()).unwrap_err();
        assert_eq!(err.action, Action::SummarizeText);
        assert_eq!(err.missing_fields, vec!["text".to_string()]);
    }

    #[test]
    fn test_describe_serializes_camel_case() {
        let descriptor = TemplateCatalog::standard()
            .get(Action::GenerateInterviewQuestions)
            .unwrap()
            .describe();
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["action"], "generate_interview_questions");
        assert_eq!(json["requiredFields"], json!(["experience", "jobRole", "techStack"]));
        assert_eq!(
            json["optionalFields"],
            json!([{ "name": "questionCount", "default": "5" }])
        );
        assert_eq!(json["profile"]["maxOutputTokens"], 2048);
        assert!(json["profile"].get("topK").is_none());
    }
}
