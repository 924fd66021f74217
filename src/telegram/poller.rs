//! Long-polling loop
//!
//! Fetches updates from Telegram and hands each text message to the
//! dispatcher, strictly one after another.

use super::client::TelegramClient;
use super::types::Update;
use crate::commands::{Dispatcher, Outcome};
use crate::transport::{Messenger, TransportError};
use std::future::Future;
use std::time::Duration;

/// Pause after a failed `getUpdates` before polling again
const POLL_ERROR_DELAY: Duration = Duration::from_secs(5);

pub struct Poller<M> {
    client: TelegramClient,
    dispatcher: Dispatcher<M>,
    poll_timeout: Duration,
    offset: Option<i64>,
}

impl<M: Messenger> Poller<M> {
    pub fn new(client: TelegramClient, dispatcher: Dispatcher<M>, poll_timeout: Duration) -> Self {
        Self {
            client,
            dispatcher,
            poll_timeout,
            offset: None,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<M> {
        &self.dispatcher
    }

    /// Offset that the next `getUpdates` call will send
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Poll until `shutdown` resolves
    ///
    /// Shutdown is only observed while waiting on Telegram, so an update that
    /// is being handled always runs to completion.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            let result = tokio::select! {
                _ = &mut shutdown => break,
                result = self.client.get_updates(self.offset, self.poll_timeout) => result,
            };

            match result {
                Ok(updates) => self.handle_updates(updates).await,
                Err(e) => {
                    tracing::warn!(error = %e, "Polling for updates failed");
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(POLL_ERROR_DELAY) => {}
                    }
                }
            }
        }

        self.confirm_offset().await;
        tracing::info!("Polling stopped");
    }

    /// Fetch one batch of updates and handle it, returning how many arrived
    pub async fn poll_once(&mut self) -> Result<usize, TransportError> {
        let updates = self
            .client
            .get_updates(self.offset, self.poll_timeout)
            .await?;
        let count = updates.len();
        self.handle_updates(updates).await;
        Ok(count)
    }

    async fn handle_updates(&mut self, updates: Vec<Update>) {
        for update in updates {
            self.offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                continue;
            };

            match self.dispatcher.dispatch(message.chat.id, &text).await {
                Ok(Outcome::Ignored) => {}
                Ok(outcome) => {
                    tracing::debug!(update_id = update.update_id, ?outcome, "Handled update");
                }
                Err(e) => {
                    tracing::error!(
                        update_id = update.update_id,
                        chat = %message.chat.id,
                        error = %e,
                        "Failed to reply"
                    );
                }
            }
        }
    }

    /// Tell Telegram the handled updates are done so they are not
    /// redelivered on the next start
    async fn confirm_offset(&self) {
        if self.offset.is_none() {
            return;
        }
        if let Err(e) = self.client.get_updates(self.offset, Duration::ZERO).await {
            tracing::warn!(error = %e, "Failed to confirm handled updates");
        }
    }
}
