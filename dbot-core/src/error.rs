//! Error types for the bot core.
//!
//! [`DbotError`] is the top-level error; [`HandlerError`] is used for plugin failures.

use thiserror::Error;

/// Top-level error for dbot (database, bot transport, handler, config, IO).
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by plugins while handling a claimed update.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Command only available in group chats: {0}")]
    GroupOnly(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
