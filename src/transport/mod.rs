//! Outgoing chat messages
//!
//! The dispatcher only needs to send text to a chat. `Messenger` is the seam
//! between it and the Telegram client, with an in-memory implementation for
//! tests.

mod memory;

pub use memory::{RecordingMessenger, SentMessage};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Telegram chat identifier (negative for groups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the chat client should interpret message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    Markdown,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Chat {0} unreachable")]
    Unreachable(ChatId),
}

/// Delivers text messages to chats
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TransportError>;
}
