//! Conversation message types.
//!
//! This module contains types for representing messages in the onboarding
//! conversation, including roles, selectable options, and message kinds.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant.
    Assistant,
}

/// Distinguishes plain text messages from "flow" messages whose options
/// carry richer enabled/disabled affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Flow,
}

/// A selectable option attached to an assistant message.
///
/// The wire format is loose: the server sends either a bare label string,
/// an `{icon, text}` pair, or a `{name}` object. All shapes normalize to a
/// single submittable label via [`MessageOption::label`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageOption {
    /// Plain label string.
    Label(String),
    /// Icon plus display text.
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        text: String,
    },
    /// Named entity (used by flow messages).
    Named { name: String },
}

impl MessageOption {
    /// Returns the string that is submitted when this option is chosen.
    pub fn label(&self) -> &str {
        match self {
            Self::Label(label) => label,
            Self::Detailed { text, .. } => text,
            Self::Named { name } => name,
        }
    }
}

/// A single message in the onboarding conversation history.
///
/// Messages are append-only within a session; reordering never occurs.
/// The step identifiers are assigned by the server only: `next_step` is the
/// step this message expects to be answered for, `step` is the step this
/// message answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Options presented alongside the message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<MessageOption>>,
    /// Timestamp when the message was created (ISO 8601 format).
    /// Client-assigned for optimistic entries, server-assigned otherwise.
    pub timestamp: String,
    /// The step this message expects to be answered for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    /// The step this message was the answer to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Message kind; absent on the wire means plain text.
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

impl Message {
    /// Creates a client-side assistant message stamped with the current time.
    ///
    /// Used to synthesize the welcome entry when the server reports an
    /// empty conversation on first load.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            options: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            next_step: None,
            step: None,
            kind: MessageKind::Text,
        }
    }

    /// Creates a client-side user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            options: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            next_step: None,
            step: None,
            kind: MessageKind::Text,
        }
    }
}
