//! Conversation roles.

use serde::{Deserialize, Serialize};

/// Who authored a message in a generation request.
///
/// Serializes in lowercase, matching chat-completions wire formats.
///
/// # Examples
///
/// ```
/// use scenecut_core::Role;
///
/// assert_eq!(format!("{}", Role::System), "system");
/// assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed instruction framing the task
    #[display("system")]
    System,
    /// The prompt
    #[display("user")]
    User,
    /// Model output
    #[display("assistant")]
    Assistant,
}
