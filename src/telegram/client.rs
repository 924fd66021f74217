//! HTTP client for the Telegram Bot API

use super::types::{ApiResponse, GetUpdatesParams, SendMessageParams, Update, User};
use crate::transport::{ChatId, Messenger, TextFormat, TransportError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Public Bot API endpoint
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Extra time allowed on top of the long-poll timeout before the HTTP
/// request itself gives up
const REQUEST_GRACE: Duration = Duration::from_secs(10);

/// Bot API client bound to one bot token
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: Secret<String>,
}

impl TelegramClient {
    /// Create a client whose requests outlive a long poll of `poll_timeout`
    pub fn new(
        token: Secret<String>,
        base_url: impl Into<String>,
        poll_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + REQUEST_GRACE)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// `getMe`: the bot's own account
    pub async fn get_me(&self) -> Result<User, TransportError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// `getUpdates`: long-poll for messages after `offset`
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TransportError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: &["message"],
        };
        self.call("getUpdates", &params).await
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, TransportError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // The token is part of the URL, so it is stripped from any error
        let url = format!("{}/bot{}/{}", self.base_url, self.token.expose_secret(), method);

        let response = self
            .http
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.without_url()))?;

        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| TransportError::Http(e.without_url()))?
            .into_result()
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TransportError> {
        let params = SendMessageParams {
            chat_id: chat,
            text,
            parse_mode: match format {
                TextFormat::Plain => None,
                TextFormat::Markdown => Some("Markdown"),
            },
        };
        let _: serde_json::Value = self.call("sendMessage", &params).await?;
        Ok(())
    }
}
