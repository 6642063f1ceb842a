//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dbot_telegram::BotConfig;

#[derive(Parser, Debug)]
#[command(name = "dbot")]
#[command(about = "Telegram bot with plugin commands and group chat tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print stored group chats (active only unless states are given).
    Groupchats {
        /// State filter; repeatable.
        #[arg(short, long = "state")]
        states: Vec<String>,
        /// Overrides DATABASE_URL.
        #[arg(long)]
        database_url: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}
