//! In-memory messenger that records everything it sends

use super::{ChatId, Messenger, TextFormat, TransportError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// A message captured by [`RecordingMessenger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat: ChatId,
    pub text: String,
    pub format: TextFormat,
}

/// Records outgoing messages instead of delivering them
///
/// Clones share the same log, so a test can keep a handle while the
/// dispatcher owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    unreachable: Arc<Mutex<HashSet<ChatId>>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every delivery to `chat` fail
    pub fn fail_chat(&self, chat: ChatId) {
        self.unreachable.lock().unwrap().insert(chat);
    }

    /// All delivered messages, oldest first
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Delivered messages addressed to `chat`
    pub fn sent_to(&self, chat: ChatId) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|message| message.chat == chat)
            .collect()
    }

    /// Text of the most recent delivered message
    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|m| m.text.clone())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TransportError> {
        if self.unreachable.lock().unwrap().contains(&chat) {
            return Err(TransportError::Unreachable(chat));
        }
        self.sent.lock().unwrap().push(SentMessage {
            chat,
            text: text.to_string(),
            format,
        });
        Ok(())
    }
}
