//! Core types: user, chat, message, and conversion traits from transport types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Name used when addressing the user: username, else first name, else the numeric id.
    pub fn display_name(&self) -> String {
        non_empty(&self.username)
            .or_else(|| non_empty(&self.first_name))
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

fn non_empty(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|s| !s.is_empty())
}

/// Chat (private, group, supergroup or channel) identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// One of "private", "group", "supergroup", "channel".
    pub chat_type: String,
    /// Title for groups and channels; `None` for private chats.
    pub title: Option<String>,
}

impl Chat {
    /// True for group and supergroup chats.
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type.as_str(), "group" | "supergroup")
    }
}

/// A single inbound update: sender, chat, text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Command token without the leading slash and without a `@botname` suffix.
    ///
    /// `"/me@corpobot hello"` yields `Some("me")`; plain text and a bare `"/"` yield `None`.
    pub fn command(&self) -> Option<&str> {
        let first = self.content.split_whitespace().next()?;
        let token = first.strip_prefix('/')?;
        let name = token.split('@').next().unwrap_or(token);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Text after the command token, trimmed. Empty when there is no command or no arguments.
    pub fn command_args(&self) -> &str {
        if self.command().is_none() {
            return "";
        }
        let trimmed = self.content.trim_start();
        match trimmed.find(char::is_whitespace) {
            Some(idx) => trimmed[idx..].trim(),
            None => "",
        }
    }
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}
