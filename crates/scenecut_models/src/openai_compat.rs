//! Client for OpenAI-compatible chat-completions endpoints.

use reqwest::{Client, StatusCode};
use scenecut_core::{GenerateRequest, GenerateResponse, Output, Role};
use scenecut_error::{ModelsError, ModelsErrorKind, ModelsResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    code: Option<u16>,
}

/// A chat-completions client usable with any OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: &'static str,
}

impl OpenAICompatibleClient {
    /// Create a client for `model` at the full chat-completions `endpoint` URL.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            provider,
        }
    }

    /// Provider label used in logs and by drivers.
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Default model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send a request and return the first choice's text.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, provider error bodies and
    /// empty replies each map to a [`ModelsErrorKind`].
    #[instrument(
        skip(self, req),
        fields(provider = self.provider, model = %self.model, messages = req.messages.len())
    )]
    pub async fn generate(&self, req: &GenerateRequest) -> ModelsResult<GenerateResponse> {
        let body = self.chat_request(req);
        debug!(model = body.model, "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Provider returned an error status");
            return Err(status_error(status, message, body.model));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let generated = parse_response(parsed)?;
        debug!(chars = generated.text().len(), "Received chat completion");
        Ok(generated)
    }

    pub(crate) fn chat_request<'a>(&'a self, req: &'a GenerateRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: req.model.as_deref().unwrap_or(&self.model),
            messages: req
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        }
    }
}

#[track_caller]
pub(crate) fn status_error(status: StatusCode, message: String, model: &str) -> ModelsError {
    let kind = match status {
        StatusCode::TOO_MANY_REQUESTS => ModelsErrorKind::RateLimit,
        StatusCode::NOT_FOUND => ModelsErrorKind::ModelNotFound(model.to_string()),
        _ => ModelsErrorKind::Api {
            status: status.as_u16(),
            message,
        },
    };
    ModelsError::new(kind)
}

pub(crate) fn parse_response(response: ChatCompletionResponse) -> ModelsResult<GenerateResponse> {
    // Some providers report failures in a 200 body.
    if let Some(error) = response.error {
        let kind = match error.code {
            Some(429) => ModelsErrorKind::RateLimit,
            Some(status) => ModelsErrorKind::Api {
                status,
                message: error.message,
            },
            None => ModelsErrorKind::ResponseParsing(error.message),
        };
        return Err(ModelsError::new(kind));
    }

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse))?;

    Ok(GenerateResponse::new(vec![Output::Text(content)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenecut_core::Message;

    fn client() -> OpenAICompatibleClient {
        OpenAICompatibleClient::new("key", "vendor/model", "http://localhost/v1", "test")
    }

    #[test]
    fn chat_request_serializes_messages_in_order() {
        let client = client();
        let req = GenerateRequest::builder()
            .messages(vec![Message::system("sys"), Message::user("hello")])
            .build()
            .unwrap();

        let json = serde_json::to_value(client.chat_request(&req)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "vendor/model",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ]
            })
        );
    }

    #[test]
    fn chat_request_honors_overrides() {
        let client = client();
        let req = GenerateRequest::builder()
            .messages(vec![Message::user("hi")])
            .model(Some("other/model".to_string()))
            .max_tokens(Some(8))
            .temperature(Some(0.5))
            .build()
            .unwrap();

        let json = serde_json::to_value(client.chat_request(&req)).unwrap();
        assert_eq!(json["model"], "other/model");
        assert_eq!(json["max_tokens"], 8);
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn parse_response_takes_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Yes"}},{"message":{"content":"No"}}]}"#,
        )
        .unwrap();
        let parsed = parse_response(response).unwrap();
        assert_eq!(parsed.text(), "Yes");
    }

    #[test]
    fn parse_response_rejects_empty_content() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        let err = parse_response(response).unwrap_err();
        assert_eq!(err.kind, ModelsErrorKind::EmptyResponse);

        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(parse_response(response).unwrap_err().kind, ModelsErrorKind::EmptyResponse);
    }

    #[test]
    fn parse_response_surfaces_error_body() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"error":{"message":"slow down","code":429}}"#).unwrap();
        let err = parse_response(response).unwrap_err();
        assert_eq!(err.kind, ModelsErrorKind::RateLimit);
        assert!(err.kind.is_retryable());
    }

    #[test]
    fn status_errors_map_to_kinds() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, String::new(), "m");
        assert_eq!(err.kind, ModelsErrorKind::RateLimit);

        let err = status_error(StatusCode::NOT_FOUND, String::new(), "m");
        assert_eq!(err.kind, ModelsErrorKind::ModelNotFound("m".to_string()));

        let err = status_error(StatusCode::UNAUTHORIZED, "bad key".to_string(), "m");
        assert!(!err.kind.is_retryable());

        let err = status_error(StatusCode::BAD_GATEWAY, String::new(), "m");
        assert!(err.kind.is_retryable());
    }
}
