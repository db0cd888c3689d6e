//! Action Dispatcher
//!
//! Resolves an action in the catalog, validates and renders the payload, and
//! makes exactly one bounded call to the completion provider. No retries, no
//! caching.

use crate::{
    catalog::TemplateCatalog,
    envelope::ResponseData,
    llm_client::{CompletionClient, CompletionRequest, CompletionResult, ProviderError},
    normalizer::{self, NormalizationError},
    payload::RequestPayload,
    validator::{self, ValidationError},
};
use serde_json::Value;
use std::{borrow::Cow, sync::Arc, time::Duration};
use tracing::{debug, error, info};

/// Every way a dispatch can fail. `Display` yields the caller-facing message.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("No action specified")]
    MissingAction,
    #[error("Unsupported action: {0}")]
    UnknownAction(String),
    #[error(transparent)]
    InvalidPayload(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Completion provider timed out after {0:?}")]
    ProviderTimeout(Duration),
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

impl DispatchError {
    /// Whether the request itself was at fault, as opposed to the provider.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DispatchError::MissingAction
                | DispatchError::UnknownAction(_)
                | DispatchError::InvalidPayload(_)
        )
    }
}

/// Extracts the action name from the raw `action` value of a request.
///
/// Absent and empty values (`null`, `""`, `0`, `false`, `[]`, `{}`) are all
/// [`DispatchError::MissingAction`]. Any other non-string value cannot name an
/// action and is reported as unsupported using its JSON text.
pub fn require_action(raw: Option<&Value>) -> Result<Cow<'_, str>, DispatchError> {
    match raw {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(DispatchError::MissingAction),
        Some(Value::String(name)) if name.is_empty() => Err(DispatchError::MissingAction),
        Some(Value::Array(items)) if items.is_empty() => Err(DispatchError::MissingAction),
        Some(Value::Object(map)) if map.is_empty() => Err(DispatchError::MissingAction),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(DispatchError::MissingAction),
        Some(Value::String(name)) => Ok(Cow::Borrowed(name.as_str())),
        Some(other) => Ok(Cow::Owned(other.to_string())),
    }
}

pub struct Dispatcher {
    catalog: &'static TemplateCatalog,
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl Dispatcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a dispatcher over the standard catalog.
    ///
    /// # Arguments
    ///
    /// * `client` - The completion provider, shared for the life of the process.
    /// * `timeout` - Upper bound on a single provider call.
    pub fn new(client: Arc<dyn CompletionClient>, timeout: Duration) -> Self {
        Self {
            catalog: TemplateCatalog::standard(),
            client,
            timeout,
        }
    }

    pub fn catalog(&self) -> &'static TemplateCatalog {
        self.catalog
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Everything up to the provider call: lookup, validation, rendering.
    ///
    /// Pure; a failure here means the provider is never contacted.
    pub fn prepare(
        &self,
        action: &str,
        payload: &RequestPayload,
    ) -> Result<CompletionRequest, DispatchError> {
        let spec = self
            .catalog
            .lookup(action)
            .ok_or_else(|| DispatchError::UnknownAction(action.to_string()))?;

        validator::validate(spec, payload)?;
        let prompt = spec.render(payload)?;

        Ok(CompletionRequest {
            prompt,
            profile: spec.profile,
        })
    }

    /// Prepares the request and calls the provider once.
    pub async fn dispatch(
        &self,
        action: &str,
        payload: &RequestPayload,
    ) -> Result<CompletionResult, DispatchError> {
        let request = self.prepare(action, payload)?;
        info!(action = %action, "Dispatching completion request");
        debug!(
            action = %action,
            prompt_len = request.prompt.len(),
            max_output_tokens = request.profile.max_output_tokens,
            "Rendered prompt"
        );

        match tokio::time::timeout(self.timeout, self.client.generate_content(request)).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                error!(action = %action, error = %e, "Completion provider failed");
                Err(DispatchError::Provider(e))
            }
            Err(_) => {
                error!(action = %action, timeout = ?self.timeout, "Completion provider timed out");
                Err(DispatchError::ProviderTimeout(self.timeout))
            }
        }
    }

    /// Dispatches and normalizes the result into canonical response data.
    pub async fn generate(
        &self,
        action: &str,
        payload: &RequestPayload,
    ) -> Result<ResponseData, DispatchError> {
        let result = self.dispatch(action, payload).await?;
        normalizer::normalize(result).map_err(|e| {
            error!(action = %action, error = %e, "Could not normalize completion response");
            DispatchError::Normalization(e)
        })
    }
}
