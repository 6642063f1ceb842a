//! The capability contract every plugin implements.

use async_trait::async_trait;
use dbot_core::{Message, Result};

use crate::registry::PluginRegistry;

/// An independently registered handler unit: start, stop, handle.
///
/// `on_start` runs once when the registry starts the plugin and is where it declares its commands;
/// `on_stop` removes them again. `handle` returns `Ok(true)` to claim the message, which ends
/// dispatch; an `Err` also ends dispatch and is reported to the transport.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Stable name, used as the owner of declared commands and in logs.
    fn name(&self) -> &str;

    async fn on_start(&self, _registry: &PluginRegistry) -> Result<()> {
        Ok(())
    }

    async fn on_stop(&self, _registry: &PluginRegistry) -> Result<()> {
        Ok(())
    }

    async fn handle(&self, message: &Message) -> Result<bool>;
}
