//! Prompt Templates
//!
//! The instruction text sent to the completion provider for each action.
//! Section headers and the requested counts ("5-8 chapters", "at least 15
//! flashcards") shape the provider's output and downstream parsers depend on
//! them, so the wording here is fixed.

use crate::payload::{MissingField, RequestPayload};

/// Renders a prompt from a payload. Must be pure.
pub type RenderFn = fn(&RequestPayload) -> Result<String, MissingField>;

pub(crate) fn generate_course(p: &RequestPayload) -> Result<String, MissingField> {
    let topic = p.require("topic")?;
    let purpose = p.require("purpose")?;
    let difficulty = p.require("difficulty")?;

    Ok(format!(
        "Create a complete course on {topic} for {purpose} at {difficulty} level.\n\n\
         Follow this exact structure:\n\n\
         # SUMMARY\nProvide a concise overview of what the course covers and its objectives.\n\n\
         # CHAPTERS\nCreate 5-8 logically structured chapters. For each chapter:\n\
         - Title: Clear and descriptive chapter title\n\
         - Content: Detailed and comprehensive content with examples, explanations, and relevant concepts\n\n\
         # FLASHCARDS\nCreate at least 15 flashcards in this format:\n\
         - Question: [question text]\n\
         - Answer: [answer text]\n\n\
         # MCQs (Multiple Choice Questions)\nCreate at least 10 multiple choice questions in this format:\n\
         - Question: [question text]\n\
         - Options: a) [option text] b) [option text] c) [option text] d) [option text]\n\
         - Correct Answer: [correct letter]\n\n\
         # Q&A PAIRS\nCreate at least 10 question and answer pairs for deeper understanding:\n\
         - Question: [detailed question]\n\
         - Answer: [comprehensive answer]\n\n\
         Ensure the course is educational, accurate, and tailored to {purpose} at {difficulty} level."
    ))
}

pub(crate) fn generate_interview_questions(p: &RequestPayload) -> Result<String, MissingField> {
    let count = p.require("questionCount")?;
    let experience = p.require("experience")?;
    let job_role = p.require("jobRole")?;
    let tech_stack = p.require("techStack")?;

    Ok(format!(
        "Generate {count} interview questions for a {experience} years experienced {job_role} \
         with expertise in {tech_stack}. The questions should be challenging and relevant to the role.\n\
         For each question:\n\
         1. Focus on technical knowledge and practical application\n\
         2. Test problem-solving abilities\n\
         3. Include scenario-based questions\n\
         4. Assess teamwork and collaboration skills\n\
         Format as a numbered list."
    ))
}

pub(crate) fn analyze_interview(p: &RequestPayload) -> Result<String, MissingField> {
    let job_role = p.require("jobRole")?;
    let question = p.require("question")?;
    let answer = p.require("answer")?;

    Ok(format!(
        "Analyze this interview response for a {job_role} position. \n\
         Question: {question}\n\
         Answer: {answer}\n\n\
         Provide detailed analysis in the following format:\n\n\
         Technical Feedback: (Analyze understanding of technical concepts and accuracy)\n\
         Communication Feedback: (Analyze clarity, structure, and language used)\n\
         Strengths: (List 3 specific strengths in the response)\n\
         Areas to Improve: (List 3 specific areas that could be improved)\n\
         Overall Rating: (Give a rating between 0-100)"
    ))
}

pub(crate) fn analyze_speech(p: &RequestPayload) -> Result<String, MissingField> {
    let job_role = p.require("jobRole")?;
    let transcript = p.require("transcript")?;

    Ok(format!(
        "Analyze this speech transcript for a {job_role} interview:\n\n\
         \"{transcript}\"\n\n\
         Evaluate the speaking skills in terms of:\n\
         1. Clarity (how clear and understandable the speech is)\n\
         2. Confidence (how confident the speaker sounds)\n\
         3. Fluency (how smoothly the speech flows)\n\
         4. Grammar and vocabulary (correctness and richness of language)\n\
         5. Technical accuracy (correct use of technical terms)\n\n\
         Provide a rating for each category (0-100) and specific feedback on how to improve."
    ))
}

pub(crate) fn generate_flashcards(p: &RequestPayload) -> Result<String, MissingField> {
    let topic = p.require("topic")?;
    let purpose = p.require("purpose")?;
    let difficulty = p.require("difficulty")?;

    Ok(format!(
        "Generate 20 detailed flashcards on the topic: {topic} for {purpose} at {difficulty} level.\n\
         Create flashcards in this exact format:\n\n\
         # FLASHCARDS\n\
         - Question: [Specific, clear question text]\n\
         - Answer: [Comprehensive, accurate answer text]\n\n\
         Make sure the flashcards cover key concepts, terms, principles, and applications related to the topic.\n\
         Each answer should be detailed enough to provide complete understanding.\n\
         Ensure varying difficulty levels across the flashcards to test different aspects of knowledge."
    ))
}

pub(crate) fn summarize_text(p: &RequestPayload) -> Result<String, MissingField> {
    let text = p.require("text")?;
    Ok(format!("Summarize the following text concisely:\n\n{text}"))
}

pub(crate) fn explain_code(p: &RequestPayload) -> Result<String, MissingField> {
    let code = p.require("code")?;
    Ok(format!(
        "Explain the following code snippet in detail, including its purpose, logic, and potential improvements:\n\n{code}"
    ))
}

/// The caller's prompt is forwarded as-is.
pub(crate) fn custom_content(p: &RequestPayload) -> Result<String, MissingField> {
    Ok(p.require("prompt")?.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn payload(value: Value) -> RequestPayload {
        match value {
            Value::Object(map) => RequestPayload::new(map),
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_course_prompt_structure() {
        let prompt = generate_course(&payload(json!({
            "topic": "Linear Algebra",
            "purpose": "exam preparation",
            "difficulty": "intermediate"
        })))
        .unwrap();

        assert!(prompt.starts_with(
            "Create a complete course on Linear Algebra for exam preparation at intermediate level.\n\n"
        ));
        assert!(prompt.contains("# CHAPTERS\nCreate 5-8 logically structured chapters."));
        assert!(prompt.contains("Create at least 15 flashcards in this format:\n- Question:"));
        assert!(prompt.contains("# Q&A PAIRS\n"));
        assert!(prompt.ends_with(
            "tailored to exam preparation at intermediate level."
        ));
    }

    #[test]
    fn test_interview_analysis_keeps_trailing_space() {
        let prompt = analyze_interview(&payload(json!({
            "jobRole": "SRE",
            "question": "What is an SLO?",
            "answer": "A target."
        })))
        .unwrap();

        assert!(prompt.starts_with(
            "Analyze this interview response for a SRE position. \nQuestion: What is an SLO?\nAnswer: A target.\n\n"
        ));
        assert!(prompt.ends_with("Overall Rating: (Give a rating between 0-100)"));
    }

    #[test]
    fn test_speech_prompt_quotes_transcript() {
        let prompt = analyze_speech(&payload(json!({
            "jobRole": "Designer",
            "transcript": "um, hello"
        })))
        .unwrap();
        assert!(prompt.contains("\"um, hello\""));
        assert!(prompt.contains("5. Technical accuracy"));
    }

    #[test]
    fn test_custom_content_is_verbatim() {
        let prompt = custom_content(&payload(json!({ "prompt": "Write a haiku." }))).unwrap();
        assert_eq!(prompt, "Write a haiku.");
    }

    #[test]
    fn test_missing_field_is_named() {
        let err = explain_code(&payload(json!({}))).unwrap_err();
        assert_eq!(err, MissingField("code".to_string()));
    }
}
