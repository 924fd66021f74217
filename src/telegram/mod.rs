//! Telegram Bot API transport
//!
//! - `client`: typed calls to `getMe`, `getUpdates` and `sendMessage`
//! - `poller`: the long-polling loop feeding the dispatcher

mod client;
mod poller;
pub mod types;

pub use client::{TelegramClient, DEFAULT_API_URL};
pub use poller::Poller;
