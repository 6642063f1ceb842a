//! Mock implementation of [`dbot_core::Bot`] for plugin tests.
//!
//! Records every `send_message(chat, text)` so tests can assert on reply text without hitting
//! Telegram. A failing mode returns a transport error for every send.

use std::sync::Mutex;

use async_trait::async_trait;
use dbot_core::{Bot, Chat, DbotError, Result};

/// One recorded call to `send_message(chat, text)`.
#[derive(Debug, Clone)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
}

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentRecord>>,
    fail: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bot whose every send fails.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|r| r.text.clone())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail {
            return Err(DbotError::Bot("send failed".to_string()));
        }
        self.sent.lock().unwrap().push(SentRecord {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }
}
