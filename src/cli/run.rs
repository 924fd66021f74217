use crate::commands::Dispatcher;
use crate::config::BotConfig;
use crate::state::StateStore;
use crate::telegram::{Poller, TelegramClient};
use crate::{Context, Result};
use colored::Colorize;

/// Start the bot and poll until Ctrl-C
pub async fn run(config: BotConfig) -> Result<()> {
    let client = TelegramClient::new(config.token.clone(), &config.api_url, config.poll_timeout)
        .context("Failed to create Telegram client")?;

    let me = client
        .get_me()
        .await
        .context("Failed to reach Telegram, check the bot token")?;

    if config.report_chat.is_none() {
        tracing::warn!(
            "REPORT_CHAT_ID is not set; round summaries will only go to the chat that completes the round"
        );
    }

    let store = StateStore::new(&config.data_file);
    let mut dispatcher = Dispatcher::new(store, client.clone(), config.report_chat);
    if let Some(username) = &me.username {
        dispatcher = dispatcher.with_bot_username(username.clone());
    }

    tracing::info!(
        bot = me.username.as_deref().unwrap_or(&me.first_name),
        data_file = %config.data_file.display(),
        reported = dispatcher.state().reported(),
        "Bot started, polling for updates"
    );
    println!(
        "{}",
        format!(
            "🤖 @{} listening (Ctrl-C to stop)",
            me.username.as_deref().unwrap_or(&me.first_name)
        )
        .cyan()
    );

    let poller = Poller::new(client, dispatcher, config.poll_timeout);
    poller.run(shutdown_signal()).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
