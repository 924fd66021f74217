//! Bot configuration
//!
//! Values come from command-line flags or their environment variables (see
//! `main.rs`); [`BotConfig::new`] validates them before the bot starts.

use crate::state::DEFAULT_DATA_FILE;
use crate::telegram::DEFAULT_API_URL;
use crate::transport::ChatId;
use secrecy::Secret;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the bot token
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the chat that receives round summaries
pub const REPORT_CHAT_ENV: &str = "REPORT_CHAT_ID";

/// Long-poll timeout used when none is configured
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing bot token: set TELEGRAM_TOKEN or pass --token")]
    MissingToken,

    #[error("Invalid REPORT_CHAT_ID {0:?}: expected a numeric chat id")]
    InvalidReportChat(String),
}

/// Validated settings for a running bot
#[derive(Clone)]
pub struct BotConfig {
    pub token: Secret<String>,
    /// Secondary destination for round summaries
    pub report_chat: Option<ChatId>,
    pub data_file: PathBuf,
    pub api_url: String,
    pub poll_timeout: Duration,
}

impl BotConfig {
    /// Validate raw settings. An absent or blank token is an error; an
    /// absent or blank report chat means no broadcast.
    pub fn new(token: Option<String>, report_chat: Option<String>) -> Result<Self, ConfigError> {
        let token = non_blank(token).ok_or(ConfigError::MissingToken)?;

        let report_chat = non_blank(report_chat)
            .map(|raw| {
                raw.parse::<i64>()
                    .map(ChatId)
                    .map_err(|_| ConfigError::InvalidReportChat(raw))
            })
            .transpose()?;

        Ok(Self {
            token: Secret::new(token),
            report_chat,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            api_url: DEFAULT_API_URL.to_string(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        })
    }

    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"[REDACTED]")
            .field("report_chat", &self.report_chat)
            .field("data_file", &self.data_file)
            .field("api_url", &self.api_url)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}
