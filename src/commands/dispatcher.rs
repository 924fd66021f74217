//! Command dispatcher
//!
//! Owns the attendance state for the lifetime of the bot. Each incoming
//! message is handled to completion, persistence and broadcast included,
//! before the next one is accepted (`dispatch` takes `&mut self`).

use super::parse::{self, Command, Rejection, Report};
use super::replies;
use crate::models::{AttendanceState, Summary};
use crate::state::StateStore;
use crate::transport::{ChatId, Messenger, TextFormat, TransportError};

/// What handling a message did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a command for this bot
    Ignored,
    /// Informational reply, no state change
    Replied,
    /// Arguments refused, no state change
    Rejected(Rejection),
    /// Report recorded, round still collecting
    Reported(Report),
    /// Report recorded and it completed the round; state has been reset
    Completed(Summary),
}

pub struct Dispatcher<M> {
    store: StateStore,
    state: AttendanceState,
    messenger: M,
    broadcast: Option<ChatId>,
    bot_username: Option<String>,
}

impl<M: Messenger> Dispatcher<M> {
    /// Create a dispatcher, loading the round in progress from `store`
    pub fn new(store: StateStore, messenger: M, broadcast: Option<ChatId>) -> Self {
        let state = store.load();
        Self {
            store,
            state,
            messenger,
            broadcast,
            bot_username: None,
        }
    }

    /// Only accept `/command@name` mentions addressed to this username
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    pub fn state(&self) -> &AttendanceState {
        &self.state
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Handle one incoming text message from `chat`
    ///
    /// Errors are delivery failures towards `chat` itself; any state change
    /// the message caused has already been applied and persisted.
    pub async fn dispatch(&mut self, chat: ChatId, text: &str) -> Result<Outcome, TransportError> {
        let command = match parse::parse(text, self.bot_username.as_deref()) {
            None => return Ok(Outcome::Ignored),
            Some(Err(rejection)) => {
                tracing::info!(chat = %chat, reason = ?rejection, "Rejected report");
                self.reply(chat, &rejection.to_string()).await?;
                return Ok(Outcome::Rejected(rejection));
            }
            Some(Ok(command)) => command,
        };

        tracing::debug!(chat = %chat, command = command.name(), "Dispatching command");

        match command {
            Command::Start | Command::Help => {
                self.reply(chat, replies::HELP).await?;
                Ok(Outcome::Replied)
            }
            Command::Status => {
                self.reply(chat, &replies::status(&self.state)).await?;
                Ok(Outcome::Replied)
            }
            Command::ChatId => {
                self.reply(chat, &replies::chat_id(chat)).await?;
                Ok(Outcome::Replied)
            }
            Command::Report(report) => self.handle_report(chat, report).await,
        }
    }

    async fn handle_report(&mut self, chat: ChatId, report: Report) -> Result<Outcome, TransportError> {
        self.state.record(report.group, report.count);
        self.persist();
        tracing::info!(
            chat = %chat,
            group = %report.group,
            count = report.count,
            reported = self.state.reported(),
            "Recorded attendance"
        );

        let acknowledged = self.reply(chat, &replies::acknowledgment(&report)).await;

        let Some(summary) = self.state.summary() else {
            acknowledged?;
            return Ok(Outcome::Reported(report));
        };

        let delivered = self.complete_round(chat, &summary).await;
        acknowledged?;
        delivered?;
        Ok(Outcome::Completed(summary))
    }

    /// Deliver the summary, then start the next round
    ///
    /// The reset happens whatever the delivery outcome.
    async fn complete_round(&mut self, chat: ChatId, summary: &Summary) -> Result<(), TransportError> {
        tracing::info!(total = summary.total, "All groups reported, round complete");

        let text = replies::summary(summary);
        let delivered = self
            .messenger
            .send_message(chat, &text, TextFormat::Markdown)
            .await;

        if let Some(destination) = self.broadcast {
            if let Err(e) = self
                .messenger
                .send_message(destination, &text, TextFormat::Markdown)
                .await
            {
                tracing::error!(destination = %destination, error = %e, "Failed to broadcast summary");
                if let Err(e) = self.reply(chat, replies::BROADCAST_FAILED).await {
                    tracing::warn!(chat = %chat, error = %e, "Failed to send broadcast warning");
                }
            }
        }

        self.state.reset();
        self.persist();

        delivered
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            tracing::error!(path = %self.store.path().display(), error = %e, "Failed to save state");
        }
    }

    async fn reply(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.messenger.send_message(chat, text, TextFormat::Plain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupId;
    use crate::transport::RecordingMessenger;
    use tempfile::TempDir;

    const CHAT: ChatId = ChatId(42);
    const REPORT_CHAT: ChatId = ChatId(-1001);

    fn setup(broadcast: Option<ChatId>) -> (TempDir, Dispatcher<RecordingMessenger>) {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::new(temp_dir.path().join("data.json"));
        let dispatcher = Dispatcher::new(store, RecordingMessenger::new(), broadcast);
        (temp_dir, dispatcher)
    }

    fn group(n: u8) -> GroupId {
        GroupId::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_help_and_start() {
        let (_temp, mut dispatcher) = setup(None);

        assert_eq!(dispatcher.dispatch(CHAT, "/start").await.unwrap(), Outcome::Replied);
        assert_eq!(dispatcher.dispatch(CHAT, "/help").await.unwrap(), Outcome::Replied);

        let sent = dispatcher.messenger().sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|m| m.text == replies::HELP));
    }

    #[tokio::test]
    async fn test_report_then_status() {
        let (_temp, mut dispatcher) = setup(None);

        let outcome = dispatcher.dispatch(CHAT, "/asistencia 4 9").await.unwrap();
        assert!(matches!(outcome, Outcome::Reported(r) if r.count == 9));
        assert_eq!(dispatcher.state().get(group(4)), Some(9));
        assert_eq!(
            dispatcher.messenger().last_text().unwrap(),
            "✅ Grupo 4 reportó 9 asistentes por Zoom."
        );

        dispatcher.dispatch(CHAT, "/estado").await.unwrap();
        assert!(dispatcher
            .messenger()
            .last_text()
            .unwrap()
            .contains("Grupo 4: ✅ 9 asistentes"));
    }

    #[tokio::test]
    async fn test_rejection_leaves_state_untouched() {
        let (_temp, mut dispatcher) = setup(None);
        dispatcher.dispatch(CHAT, "/asistencia 1 3").await.unwrap();
        let before = dispatcher.state().clone();

        for text in ["/asistencia 7 3", "/asistencia 2 -1", "/asistencia 2", "/asistencia x y"] {
            let outcome = dispatcher.dispatch(CHAT, text).await.unwrap();
            assert!(matches!(outcome, Outcome::Rejected(_)), "{text}");
        }

        assert_eq!(dispatcher.state(), &before);
    }

    #[tokio::test]
    async fn test_report_persists_each_change() {
        let (temp, mut dispatcher) = setup(None);
        dispatcher.dispatch(CHAT, "/asistencia 2 15").await.unwrap();

        let reloaded = StateStore::new(temp.path().join("data.json")).load();
        assert_eq!(reloaded.get(group(2)), Some(15));
    }

    #[tokio::test]
    async fn test_completion_resets_even_if_reply_fails() {
        let (temp, mut dispatcher) = setup(None);
        for n in 1..=5 {
            dispatcher
                .dispatch(CHAT, &format!("/asistencia {n} 1"))
                .await
                .unwrap();
        }

        dispatcher.messenger().fail_chat(CHAT);
        let result = dispatcher.dispatch(CHAT, "/asistencia 6 1").await;

        assert!(matches!(result, Err(TransportError::Unreachable(_))));
        assert!(dispatcher.state().is_empty());
        assert!(StateStore::new(temp.path().join("data.json")).load().is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_on_completion() {
        let (_temp, mut dispatcher) = setup(Some(REPORT_CHAT));
        for n in 1..=6 {
            dispatcher
                .dispatch(CHAT, &format!("/asistencia {n} 2"))
                .await
                .unwrap();
        }

        let broadcast = dispatcher.messenger().sent_to(REPORT_CHAT);
        assert_eq!(broadcast.len(), 1);
        assert_eq!(broadcast[0].format, TextFormat::Markdown);
        assert!(broadcast[0].text.ends_with("✅ *Total:* 12"));
    }

    #[tokio::test]
    async fn test_broadcast_failure_warns_and_still_resets() {
        let (_temp, mut dispatcher) = setup(Some(REPORT_CHAT));
        dispatcher.messenger().fail_chat(REPORT_CHAT);

        let mut outcome = Outcome::Ignored;
        for n in 1..=6 {
            outcome = dispatcher
                .dispatch(CHAT, &format!("/asistencia {n} 3"))
                .await
                .unwrap();
        }

        assert!(matches!(outcome, Outcome::Completed(ref s) if s.total == 18));
        assert_eq!(
            dispatcher.messenger().last_text().unwrap(),
            replies::BROADCAST_FAILED
        );
        assert!(dispatcher.state().is_empty());
    }

    #[tokio::test]
    async fn test_ignores_plain_text_and_other_bots() {
        let (_temp, dispatcher) = setup(None);
        let mut dispatcher = dispatcher.with_bot_username("AsistenciaBot");

        assert_eq!(dispatcher.dispatch(CHAT, "hola").await.unwrap(), Outcome::Ignored);
        assert_eq!(
            dispatcher.dispatch(CHAT, "/asistencia@OtroBot 1 2").await.unwrap(),
            Outcome::Ignored
        );
        assert!(dispatcher.messenger().sent().is_empty());
        assert!(dispatcher.state().is_empty());
    }

    #[tokio::test]
    async fn test_getchatid() {
        let (_temp, mut dispatcher) = setup(None);
        dispatcher.dispatch(ChatId(-5), "/getchatid").await.unwrap();
        assert_eq!(
            dispatcher.messenger().last_text().unwrap(),
            "Este chat tiene id: -5"
        );
    }
}
