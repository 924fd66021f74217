// Asistencia Bot - Zoom attendance collection over Telegram
// Six groups report their counts; once all have reported, the round summary is
// posted and a new round begins.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod state;
pub mod telegram;
pub mod transport;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use commands::{Dispatcher, Outcome};
pub use config::BotConfig;
pub use models::{AttendanceState, GroupId, Summary};
pub use state::StateStore;
pub use transport::{ChatId, Messenger};
