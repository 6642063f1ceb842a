//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; `dbot-telegram` implements it via teloxide, tests use recording mocks.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Outbound message delivery. Fire-and-forget from the caller's side: failures are returned, never retried.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply into the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
