//! `/me`: tells the sender their Telegram user id.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Message, Result};
use plugin_registry::{Plugin, PluginRegistry};
use tracing::debug;

const COMMAND: &str = "me";

pub struct MePlugin {
    bot: Arc<dyn Bot>,
}

impl MePlugin {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Plugin for MePlugin {
    fn name(&self) -> &str {
        "me"
    }

    async fn on_start(&self, registry: &PluginRegistry) -> Result<()> {
        debug!("[MePlugin] Started");
        registry
            .register_command(self.name(), COMMAND, "Show your name and Telegram id")
            .await;
        Ok(())
    }

    async fn on_stop(&self, registry: &PluginRegistry) -> Result<()> {
        debug!("[MePlugin] Stopped");
        registry.unregister_command(COMMAND).await;
        Ok(())
    }

    async fn handle(&self, message: &Message) -> Result<bool> {
        if message.command() != Some(COMMAND) {
            return Ok(false);
        }

        let text = format!(
            "Hello {}, your ID: {}",
            message.user.display_name(),
            message.user.id
        );
        self.bot.reply_to(message, &text).await?;
        Ok(true)
    }
}
