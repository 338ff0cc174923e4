//! Output types from generation responses.

use serde::{Deserialize, Serialize};

/// Content returned by a generation driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output, for providers with a native JSON mode.
    Json(serde_json::Value),
}

impl Output {
    /// The output rendered as text.
    pub fn as_text(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Json(value) => value.to_string(),
        }
    }
}
