//! OpenRouter driver using the OpenAI-compatible client.

use crate::OpenAICompatibleClient;
use async_trait::async_trait;
use scenecut_core::{GenerateRequest, GenerateResponse};
use scenecut_error::{ModelsError, ModelsErrorKind, ModelsResult, ScenecutResult};
use scenecut_interface::ScenecutDriver;
use tracing::instrument;

/// OpenRouter chat-completions URL.
pub const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used when the caller has no preference.
pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemini-2.5-flash-preview-05-20";

const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// OpenRouter driver.
#[derive(Debug, Clone)]
pub struct OpenRouterDriver {
    inner: OpenAICompatibleClient,
}

impl OpenRouterDriver {
    /// Creates a driver reading the key from `OPENROUTER_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelsErrorKind::MissingApiKey`] if the variable is unset or empty.
    #[instrument(skip_all, fields(model = %model.as_ref()))]
    pub fn new(model: impl AsRef<str>) -> ModelsResult<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::MissingApiKey(API_KEY_VAR.to_string())))?;

        Ok(Self::with_api_key(api_key, model.as_ref()))
    }

    /// Creates a driver with an explicit key.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            inner: OpenAICompatibleClient::new(api_key, model, OPENROUTER_ENDPOINT, "openrouter"),
        }
    }
}

#[async_trait]
impl ScenecutDriver for OpenRouterDriver {
    #[instrument(skip(self, req), fields(provider = "openrouter", model = %self.inner.model_name()))]
    async fn generate(&self, req: &GenerateRequest) -> ScenecutResult<GenerateResponse> {
        Ok(self.inner.generate(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
