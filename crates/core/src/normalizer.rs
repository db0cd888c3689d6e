//! Response Normalizer
//!
//! Providers do not agree on a response shape. This module reduces whatever a
//! [`CompletionClient`](crate::llm_client::CompletionClient) returns to the
//! canonical [`ResponseData`], or fails with a [`NormalizationError`]. A
//! provider-native object is never passed through unshaped.

use crate::{envelope::ResponseData, llm_client::CompletionResult};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("Prompt blocked by provider: {0}")]
    Blocked(String),
    #[error("Completion finished without text: {0}")]
    NoText(String),
    #[error("Unrecognized completion response shape")]
    UnrecognizedShape,
}

/// Converts a completion result into canonical response data.
///
/// Extraction order:
/// 1. plain text, or a top-level `text` string;
/// 2. the text parts of the first candidate, concatenated;
/// 3. otherwise an error explaining why no text is available.
pub fn normalize(result: CompletionResult) -> Result<ResponseData, NormalizationError> {
    match result {
        CompletionResult::Text(text) => Ok(ResponseData::from_text(text)),
        CompletionResult::Native(value) => extract_text(&value).map(ResponseData::from_text),
    }
}

fn extract_text(value: &Value) -> Result<String, NormalizationError> {
    if let Some(text) = value.get("text").and_then(Value::as_str) {
        return Ok(text.to_owned());
    }

    if let Some(parts) = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
    {
        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();
        if !texts.is_empty() {
            return Ok(texts.concat());
        }
    }

    if let Some(reason) = value
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        return Err(NormalizationError::Blocked(reason.to_owned()));
    }

    if let Some(reason) = value
        .pointer("/candidates/0/finishReason")
        .and_then(Value::as_str)
    {
        return Err(NormalizationError::NoText(reason.to_owned()));
    }

    Err(NormalizationError::UnrecognizedShape)
}
