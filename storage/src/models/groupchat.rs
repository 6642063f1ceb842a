//! Group chat record.
//!
//! Maps to the `groupchats` table and is used by GroupchatRepository.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::mapper::{Record, RecordDescription, RowReader};

pub const STATE_ACTIVE: &str = "active";
pub const STATE_PENDING: &str = "pending";
pub const STATE_CLOSED: &str = "closed";

/// A Telegram group chat known to the bot.
///
/// `platform_id` is the Telegram chat id (column `telegram_id`) and is unique. A record with an
/// empty `state` is what a lookup returns when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Groupchat {
    pub id: i64,
    pub title: String,
    pub platform_id: i64,
    pub state: String,
    pub invite_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Groupchat {
    /// Unsaved candidate for `insert_if_absent`; `id` and `created_at` are assigned on insert.
    pub fn new(platform_id: i64, title: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            platform_id,
            title: title.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    pub fn with_invite_link(mut self, invite_link: impl Into<String>) -> Self {
        self.invite_link = Some(invite_link.into());
        self
    }

    /// True for the zero value returned by a lookup that matched nothing.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl fmt::Display for Groupchat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [id {}]", self.title, self.platform_id)?;
        if let Some(link) = &self.invite_link {
            write!(f, " {}", link)?;
        }
        Ok(())
    }
}

fn groupchat_from_row(row: &RowReader<'_, Groupchat>) -> Result<Groupchat, StorageError> {
    Ok(Groupchat {
        id: row.get("id")?,
        title: row.get("title")?,
        platform_id: row.get("platform_id")?,
        state: row.get("state")?,
        invite_link: row.get("invite_link")?,
        created_at: row.get("created_at")?,
    })
}

impl Record for Groupchat {
    fn description() -> &'static RecordDescription<Self> {
        static DESCRIPTION: OnceLock<RecordDescription<Groupchat>> = OnceLock::new();
        DESCRIPTION.get_or_init(|| {
            RecordDescription::builder("groupchats")
                .field("id", "id")
                .field("title", "title")
                .field("platform_id", "telegram_id")
                .field("state", "state")
                .field("invite_link", "invite_link")
                .field("created_at", "created_at")
                .build(groupchat_from_row)
        })
    }
}
