use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Identifies which prompt template and generation profile a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GenerateCourse,
    GenerateInterviewQuestions,
    AnalyzeInterview,
    AnalyzeSpeech,
    GenerateFlashcards,
    SummarizeText,
    ExplainCode,
    CustomContent,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::GenerateCourse,
        Action::GenerateInterviewQuestions,
        Action::AnalyzeInterview,
        Action::AnalyzeSpeech,
        Action::GenerateFlashcards,
        Action::SummarizeText,
        Action::ExplainCode,
        Action::CustomContent,
    ];

    /// The wire name callers send in the `action` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GenerateCourse => "generate_course",
            Action::GenerateInterviewQuestions => "generate_interview_questions",
            Action::AnalyzeInterview => "analyze_interview",
            Action::AnalyzeSpeech => "analyze_speech",
            Action::GenerateFlashcards => "generate_flashcards",
            Action::SummarizeText => "summarize_text",
            Action::ExplainCode => "explain_code",
            Action::CustomContent => "custom_content",
        }
    }

    /// Resolves a wire name. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for action in Action::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            Action::from_name("summarize_text"),
            Some(Action::SummarizeText)
        );
        assert_eq!(Action::from_name("Summarize_Text"), None);
        assert_eq!(Action::from_name("bogus"), None);
        assert_eq!(Action::from_name(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Action::AnalyzeSpeech), "analyze_speech");
    }
}
