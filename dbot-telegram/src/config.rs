//! Bot config: Telegram connection, logging, database. Loaded from env.
//! Reads BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE, DATABASE_URL.

use anyhow::{Context, Result};
use dbot_core::DbotError;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "./dbot.db";
pub const DEFAULT_LOG_FILE: &str = "logs/dbot.log";

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// DATABASE_URL: SQLite file path or `sqlite:` URL
    pub database_url: String,
}

impl BotConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url,
        })
    }

    /// Uses the given token; everything else takes its default.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: DEFAULT_LOG_FILE.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }

    /// Checks the config before anything is initialized.
    pub fn validate(&self) -> std::result::Result<(), DbotError> {
        if self.bot_token.trim().is_empty() {
            return Err(DbotError::Config("BOT_TOKEN is empty".to_string()));
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                return Err(DbotError::Config(format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                )));
            }
        }
        Ok(())
    }

    /// Builds the teloxide client, pointing it at the custom API URL when one is set.
    pub fn teloxide_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .with_context(|| format!("Invalid Telegram API URL: {}", url))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
