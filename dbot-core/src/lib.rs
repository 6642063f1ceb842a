//! # dbot-core
//!
//! Core types and traits for the bot: [`Bot`], [`Message`], [`User`], [`Chat`], error types,
//! and tracing initialization. Transport-agnostic; used by plugin-registry, dbot-plugins and dbot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Message, ToCoreMessage, ToCoreUser, User};
