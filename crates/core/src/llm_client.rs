use crate::catalog::GenerationProfile;
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use serde_json::Value;

/// A rendered prompt plus the generation profile of the action it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub profile: GenerationProfile,
}

/// What a completion provider hands back.
///
/// Providers either expose the generated text directly or return their own
/// response object. The latter is never exposed to callers; the normalizer
/// reshapes it first.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    Text(String),
    Native(Value),
}

/// A failed provider call. The message is surfaced to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[error("{0}")]
    Request(String),
    /// The provider answered with an error (auth, quota, malformed prompt).
    #[error("{0}")]
    Api(String),
    /// The provider answered, but the body could not be read.
    #[error("{0}")]
    InvalidResponse(String),
}

/// The external service that turns a prompt into generated text.
///
/// One instance is built at startup and shared by every request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate_content(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError>;
}

/// An implementation of `CompletionClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The specific model identifier to use for chat completions (e.g., "gpt-4o").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

impl From<OpenAIError> for ProviderError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => ProviderError::Api(api.message),
            other => ProviderError::Request(other.to_string()),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAICompatibleClient {
    async fn generate_content(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let profile = request.profile;
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(vec![
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.prompt)
                    .build()?
                    .into(),
            ])
            .temperature(profile.temperature as f32)
            .max_completion_tokens(profile.max_output_tokens);
        // Chat completions have no top-k equivalent.
        if let Some(top_p) = profile.top_p {
            args.top_p(top_p as f32);
        }

        let response = self.client.chat().create(args.build()?).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("LLM response had no text content.".to_string())
            })?;

        Ok(CompletionResult::Text(content))
    }
}
