//! Shared helpers for plugin tests: a recording [`Bot`] and message builders.

#![allow(dead_code)]

pub mod mock_bot;

use chrono::Utc;
use dbot_core::{Chat, Message, User};

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: Some(username.to_string()),
        first_name: None,
        last_name: None,
    }
}

pub fn private_message(from: User, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        chat: Chat {
            id: from.id,
            chat_type: "private".to_string(),
            title: None,
        },
        user: from,
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

pub fn group_message(chat_id: i64, title: &str, content: &str) -> Message {
    Message {
        id: "2".to_string(),
        user: user(7, "bob"),
        chat: Chat {
            id: chat_id,
            chat_type: "supergroup".to_string(),
            title: Some(title.to_string()),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}
