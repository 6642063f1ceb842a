//! Dispatcher: offers one message to the active plugins in registration order until one claims it.

use std::sync::Arc;

use dbot_core::{Message, Result};
use tracing::{debug, error, info, instrument};

use crate::registry::PluginRegistry;

/// Result of dispatching one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The named plugin claimed the message.
    Claimed { plugin: String },
    /// No plugin claimed it. A normal outcome, not an error.
    Unhandled,
}

impl DispatchOutcome {
    pub fn is_claimed(&self) -> bool {
        matches!(self, DispatchOutcome::Claimed { .. })
    }
}

/// Routes messages through a shared [`PluginRegistry`]. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<PluginRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Dispatches `message`.
    ///
    /// A command that is not in the command table is unhandled without offering it to any plugin.
    /// Otherwise plugins are asked in registration order; the first `Ok(true)` wins and the first
    /// `Err` ends dispatch and is returned as is.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn dispatch(&self, message: &Message) -> Result<DispatchOutcome> {
        let command = message.command();

        if let Some(name) = command {
            if !self.registry.is_command_registered(name).await {
                debug!(command = %name, "step: command not registered, unhandled");
                return Ok(DispatchOutcome::Unhandled);
            }
        }

        for plugin in self.registry.list_active_plugins().await {
            debug!(plugin = %plugin.name(), command = ?command, "step: offering message to plugin");
            match plugin.handle(message).await {
                Ok(true) => {
                    info!(plugin = %plugin.name(), command = ?command, "step: message claimed");
                    return Ok(DispatchOutcome::Claimed {
                        plugin: plugin.name().to_string(),
                    });
                }
                Ok(false) => continue,
                Err(e) => {
                    error!(plugin = %plugin.name(), command = ?command, error = %e, "step: plugin failed, dispatch aborted");
                    return Err(e);
                }
            }
        }

        debug!(command = ?command, "step: no plugin claimed message");
        Ok(DispatchOutcome::Unhandled)
    }
}
