//! # dbot-plugins
//!
//! Concrete plugins and the fixed registration order used by the bot binary.

mod groupchats;
mod help;
mod me;

pub use groupchats::GroupchatsPlugin;
pub use help::HelpPlugin;
pub use me::MePlugin;

use std::sync::Arc;

use dbot_core::Bot;
use plugin_registry::PluginRegistry;
use storage::GroupchatRepository;

/// Registers the default plugins in dispatch order: help, me, groupchats.
///
/// groupchats goes last because it also observes unclaimed group messages.
pub async fn register_default_plugins(
    registry: &PluginRegistry,
    bot: Arc<dyn Bot>,
    repo: GroupchatRepository,
) {
    registry
        .register(Arc::new(HelpPlugin::new(bot.clone(), registry.command_table())))
        .await;
    registry.register(Arc::new(MePlugin::new(bot.clone()))).await;
    registry
        .register(Arc::new(GroupchatsPlugin::new(bot, repo)))
        .await;
}
