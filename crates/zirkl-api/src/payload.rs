//! Wire payload normalization.
//!
//! The conversation history endpoint has shipped three shapes over time:
//! `{conversations: [...], count}`, `{messages: [...]}`, and a bare array.
//! All three decode into [`ConversationPayload`] at the boundary and are
//! normalized to one canonical message sequence immediately, so nothing
//! downstream ever branches on payload shape.

use serde::Deserialize;
use zirkl_core::Message;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ConversationPayload {
    Wrapped {
        conversations: Vec<Message>,
        #[serde(default)]
        #[allow(dead_code)]
        count: Option<u64>,
    },
    Messages {
        messages: Vec<Message>,
    },
    Bare(Vec<Message>),
}

impl ConversationPayload {
    /// Flattens whichever shape arrived into the canonical sequence.
    pub(crate) fn into_messages(self) -> Vec<Message> {
        match self {
            Self::Wrapped { conversations, .. } => conversations,
            Self::Messages { messages } => messages,
            Self::Bare(messages) => messages,
        }
    }
}

/// Body of the welcome/returning message endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct FillerMessage {
    pub(crate) message: String,
}

/// Body of the loading-messages endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct LoadingMessages {
    pub(crate) messages: Vec<String>,
}
