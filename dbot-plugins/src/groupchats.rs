//! Group chat tracking.
//!
//! Records every group the bot sees a plain message in and keeps its title current. Commands:
//! `/groupchats [state ...]` lists stored chats, `/setinvite <link>` stores the invite link of the
//! current group.
//!
//! Only plain messages that no earlier plugin claimed are observed. Commands never are: the
//! dispatcher drops commands missing from the command table before any plugin sees them, and
//! registered ones belong to their owner. A group whose only traffic is commands (`/start`,
//! another bot's commands) is recorded once someone writes plain text there or runs `/setinvite`.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, DbotError, HandlerError, Message, Result};
use plugin_registry::{Plugin, PluginRegistry};
use storage::{Groupchat, GroupchatRepository, StorageError, STATE_ACTIVE};
use tracing::{error, info, instrument};

const LIST_COMMAND: &str = "groupchats";
const SET_INVITE_COMMAND: &str = "setinvite";

fn database_error(e: StorageError) -> DbotError {
    error!(error = %e, "Groupchat storage failed");
    DbotError::Database(e.to_string())
}

pub struct GroupchatsPlugin {
    bot: Arc<dyn Bot>,
    repo: GroupchatRepository,
}

impl GroupchatsPlugin {
    pub fn new(bot: Arc<dyn Bot>, repo: GroupchatRepository) -> Self {
        Self { bot, repo }
    }

    /// Stores the chat of a group message, or refreshes its title if it is already stored.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn observe(&self, message: &Message) -> Result<()> {
        let title = message.chat.title.clone().unwrap_or_default();
        let candidate = Groupchat::new(message.chat.id, title.clone(), STATE_ACTIVE);

        match self.repo.insert_if_absent(candidate).await {
            Ok(stored) => {
                info!(id = stored.id, title = %stored.title, "Recorded new group chat");
                Ok(())
            }
            Err(StorageError::AlreadyExists(mut existing)) => {
                if !title.is_empty() && existing.title != title {
                    existing.title = title;
                    self.repo
                        .update_title(&existing)
                        .await
                        .map_err(database_error)?;
                    info!(title = %existing.title, "Group chat title updated");
                }
                Ok(())
            }
            Err(e) => Err(database_error(e)),
        }
    }

    async fn list(&self, message: &Message) -> Result<()> {
        let states: Vec<String> = message
            .command_args()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let groupchats = self.repo.list(&states).await.map_err(database_error)?;

        let text = if groupchats.is_empty() {
            "No group chats found.".to_string()
        } else {
            groupchats
                .iter()
                .map(|g| format!("{} ({})", g, g.state))
                .collect::<Vec<_>>()
                .join("\n")
        };
        self.bot.reply_to(message, &text).await
    }

    async fn set_invite(&self, message: &Message) -> Result<()> {
        if !message.chat.is_group() {
            let err = HandlerError::GroupOnly(SET_INVITE_COMMAND.to_string());
            return self.bot.reply_to(message, &err.to_string()).await;
        }
        let link = message.command_args();
        if link.is_empty() {
            let err = HandlerError::MissingArgument("invite link".to_string());
            return self.bot.reply_to(message, &err.to_string()).await;
        }

        let title = message.chat.title.clone().unwrap_or_default();
        let groupchat = Groupchat::new(message.chat.id, title, STATE_ACTIVE).with_invite_link(link);
        let rows = self
            .repo
            .update_invite_link(&groupchat)
            .await
            .map_err(database_error)?;
        if rows == 0 {
            // Not recorded yet: the insert carries the link.
            match self.repo.insert_if_absent(groupchat.clone()).await {
                Ok(_) => {}
                Err(StorageError::AlreadyExists(_)) => {
                    self.repo
                        .update_invite_link(&groupchat)
                        .await
                        .map_err(database_error)?;
                }
                Err(e) => return Err(database_error(e)),
            }
        }

        info!(chat_id = message.chat.id, "Invite link stored");
        self.bot.reply_to(message, "Invite link saved.").await
    }
}

#[async_trait]
impl Plugin for GroupchatsPlugin {
    fn name(&self) -> &str {
        "groupchats"
    }

    async fn on_start(&self, registry: &PluginRegistry) -> Result<()> {
        registry
            .register_command(self.name(), LIST_COMMAND, "List group chats, optionally by state")
            .await;
        registry
            .register_command(self.name(), SET_INVITE_COMMAND, "Store this group's invite link")
            .await;
        Ok(())
    }

    async fn on_stop(&self, registry: &PluginRegistry) -> Result<()> {
        registry.unregister_command(LIST_COMMAND).await;
        registry.unregister_command(SET_INVITE_COMMAND).await;
        Ok(())
    }

    async fn handle(&self, message: &Message) -> Result<bool> {
        match message.command() {
            Some(LIST_COMMAND) => {
                self.list(message).await?;
                Ok(true)
            }
            Some(SET_INVITE_COMMAND) => {
                self.set_invite(message).await?;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => {
                if message.chat.is_group() {
                    self.observe(message).await?;
                }
                Ok(false)
            }
        }
    }
}
