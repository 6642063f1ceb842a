//! `/help`: lists the registered commands with their help text.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Message, Result};
use plugin_registry::{CommandTable, Plugin, PluginRegistry};

const COMMAND: &str = "help";

pub struct HelpPlugin {
    bot: Arc<dyn Bot>,
    commands: Arc<CommandTable>,
}

impl HelpPlugin {
    pub fn new(bot: Arc<dyn Bot>, commands: Arc<CommandTable>) -> Self {
        Self { bot, commands }
    }

    /// One `/name - help` line per command, sorted by name.
    pub async fn render(&self) -> String {
        let lines: Vec<String> = self
            .commands
            .list()
            .await
            .into_iter()
            .map(|c| format!("/{} - {}", c.name, c.help))
            .collect();
        if lines.is_empty() {
            "No commands registered.".to_string()
        } else {
            lines.join("\n")
        }
    }
}

#[async_trait]
impl Plugin for HelpPlugin {
    fn name(&self) -> &str {
        "help"
    }

    async fn on_start(&self, registry: &PluginRegistry) -> Result<()> {
        registry
            .register_command(self.name(), COMMAND, "List available commands")
            .await;
        Ok(())
    }

    async fn on_stop(&self, registry: &PluginRegistry) -> Result<()> {
        registry.unregister_command(COMMAND).await;
        Ok(())
    }

    async fn handle(&self, message: &Message) -> Result<bool> {
        if message.command() != Some(COMMAND) {
            return Ok(false);
        }
        let text = self.render().await;
        self.bot.reply_to(message, &text).await?;
        Ok(true)
    }
}
