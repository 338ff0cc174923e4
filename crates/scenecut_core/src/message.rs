//! Message types for generation requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message.
///
/// # Examples
///
/// ```
/// use scenecut_core::{Message, Role};
///
/// let message = Message::builder()
///     .role(Role::User)
///     .content("Split this text into scenes")
///     .build()
///     .unwrap();
///
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The message text
    #[builder(setter(into))]
    pub content: String,
}

impl Message {
    /// Creates a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// A system instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user prompt.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
