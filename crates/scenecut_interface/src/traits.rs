//! The generation capability trait.

use async_trait::async_trait;
use scenecut_core::{GenerateRequest, GenerateResponse, Message};
use scenecut_error::{BackendError, ScenecutResult};
use std::sync::Arc;

/// Core trait that every generation backend implements.
///
/// Only [`generate`](ScenecutDriver::generate) is required. The pipeline
/// talks to drivers through
/// [`generate_text_with`](ScenecutDriver::generate_text_with), the
/// `generate(system_instruction, user_prompt) -> string` form with sampling
/// settings attached.
#[async_trait]
pub trait ScenecutDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> ScenecutResult<GenerateResponse>;

    /// Provider name (e.g., "openrouter").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;

    /// Send a system instruction and a prompt, receive the reply text.
    ///
    /// # Errors
    ///
    /// Propagates driver failures.
    async fn generate_text(&self, system: &str, prompt: &str) -> ScenecutResult<String> {
        self.generate_text_with(system, prompt, None, None).await
    }

    /// [`generate_text`](ScenecutDriver::generate_text) with a token cap and
    /// sampling temperature.
    ///
    /// # Errors
    ///
    /// Propagates driver failures.
    #[tracing::instrument(
        skip(self, system, prompt),
        fields(provider = self.provider_name(), prompt_len = prompt.len())
    )]
    async fn generate_text_with(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> ScenecutResult<String> {
        let request = GenerateRequest::builder()
            .messages(vec![Message::system(system), Message::user(prompt)])
            .max_tokens(max_tokens)
            .temperature(temperature)
            .build()
            .map_err(|e| BackendError::new(format!("Failed to build request: {}", e)))?;
        let response = self.generate(&request).await?;
        Ok(response.text())
    }
}

#[async_trait]
impl<D: ScenecutDriver + ?Sized> ScenecutDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> ScenecutResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<D: ScenecutDriver + ?Sized> ScenecutDriver for &D {
    async fn generate(&self, req: &GenerateRequest) -> ScenecutResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<D: ScenecutDriver + ?Sized> ScenecutDriver for Box<D> {
    async fn generate(&self, req: &GenerateRequest) -> ScenecutResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
