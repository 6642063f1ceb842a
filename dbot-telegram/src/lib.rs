//! # dbot-telegram
//!
//! Telegram layer: adapters, [`dbot_core::Bot`] implementation, env config, REPL runner.
//! Handles only Telegram connectivity and dispatching into the plugin registry; no persistence.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramChatWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{BotConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
pub use runner::{publish_commands, run_repl};
