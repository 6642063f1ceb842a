//! # dbot-cli
//!
//! Argument parsing, config loading and the bot bootstrap: database, plugins in fixed order,
//! registry lifecycle around the Telegram REPL.

pub mod app;
pub mod cli;

pub use app::{groupchats_table, print_groupchats, run_bot};
pub use cli::{load_config, Cli, Commands};
pub use dbot_telegram::BotConfig;
