//! Gemini `generateContent` Client
//!
//! Calls the native Gemini REST endpoint, which accepts the full generation
//! profile (including top-k). The response body is handed back untouched as a
//! [`CompletionResult::Native`] and shaped by the normalizer.

use crate::llm_client::{CompletionClient, CompletionRequest, CompletionResult, ProviderError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

// --- Wire Types ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
}

impl<'a> From<&'a CompletionRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        let profile = request.profile;
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: profile.temperature,
                max_output_tokens: profile.max_output_tokens,
                top_k: profile.top_k,
                top_p: profile.top_p,
            },
        }
    }
}

/// Builds the caller-facing message for a non-success response.
///
/// Gemini reports failures as `{"error": {"code", "message", "status"}}`; the
/// inner message is preferred, falling back to the raw body.
fn api_error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        format!("Gemini API error: {status}")
    } else {
        format!("Gemini API error: {status} {detail}")
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            api_base,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn generate_content(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let body = GenerateContentRequest::from(&request);
        debug!(model = %self.model, "Sending generateContent request");

        // `without_url` keeps the API key (a query parameter) out of error text.
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(api_error_message(status, &text)));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.without_url().to_string()))?;

        Ok(CompletionResult::Native(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{action::Action, catalog::TemplateCatalog};

    fn request_for(action: Action, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            prompt: prompt.to_string(),
            profile: TemplateCatalog::standard().get(action).unwrap().profile,
        }
    }

    #[test]
    fn test_request_body_with_sampling() {
        let request = request_for(Action::GenerateCourse, "Teach me");
        let json = serde_json::to_string(&GenerateContentRequest::from(&request)).unwrap();
        assert_eq!(
            json,
            r#"{"contents":[{"parts":[{"text":"Teach me"}]}],"generationConfig":{"temperature":0.7,"maxOutputTokens":8192,"topK":40,"topP":0.95}}"#
        );
    }

    #[test]
    fn test_request_body_without_sampling() {
        let request = request_for(Action::SummarizeText, "Summarize");
        let json = serde_json::to_string(&GenerateContentRequest::from(&request)).unwrap();
        assert_eq!(
            json,
            r#"{"contents":[{"parts":[{"text":"Summarize"}]}],"generationConfig":{"temperature":0.5,"maxOutputTokens":1024}}"#
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(
            "key".to_string(),
            DEFAULT_MODEL.to_string(),
            format!("{DEFAULT_API_BASE}/"),
        );
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_api_error_message_prefers_provider_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted (e.g. check quota).","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            api_error_message(StatusCode::TOO_MANY_REQUESTS, body),
            "Gemini API error: 429 Too Many Requests Resource has been exhausted (e.g. check quota)."
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(
            api_error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "Gemini API error: 502 Bad Gateway upstream down"
        );
        assert_eq!(
            api_error_message(StatusCode::FORBIDDEN, ""),
            "Gemini API error: 403 Forbidden"
        );
    }
}
