//! Request and response types for generation calls.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// A generation request: a system instruction plus a prompt, usually.
///
/// # Examples
///
/// ```
/// use scenecut_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![
///         Message::system("You are a literary analyst."),
///         Message::user("Is Scene B a continuation of Scene A?"),
///     ])
///     .max_tokens(Some(16))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 2);
/// assert_eq!(request.temperature, None);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Total characters across all messages, for token estimates.
    pub fn char_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use scenecut_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse::new(vec![
///     Output::Text("Yes".to_string()),
/// ]);
/// assert_eq!(response.text(), "Yes");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// All outputs concatenated as text.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .map(Output::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}
