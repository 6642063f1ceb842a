//! Plugin registry: ordered plugin collection plus the command table.
//!
//! The plugin list is append-only; starting and stopping only toggle whether a plugin is active.
//! Both collections sit behind `RwLock`s so dispatch (reads) can run concurrently while
//! registration (writes) is exclusive. No lock is held while a plugin hook runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use dbot_core::Result;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::plugin::Plugin;

/// A declared command: name (without slash), one-line help, owning plugin name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub help: String,
    pub owner: String,
}

/// Command name -> [`CommandInfo`], sorted by name.
///
/// Shared as `Arc<CommandTable>` so plugins that list commands (help) can read it without holding
/// a reference to the registry itself.
#[derive(Debug, Default)]
pub struct CommandTable {
    entries: RwLock<BTreeMap<String, CommandInfo>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `name`. Returns the previous entry when one was replaced.
    pub async fn register(&self, owner: &str, name: &str, help: &str) -> Option<CommandInfo> {
        let info = CommandInfo {
            name: name.to_string(),
            help: help.to_string(),
            owner: owner.to_string(),
        };
        self.entries.write().await.insert(name.to_string(), info)
    }

    /// Removes `name`. Returns whether it was registered.
    pub async fn unregister(&self, name: &str) -> bool {
        self.entries.write().await.remove(name).is_some()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }

    pub async fn get(&self, name: &str) -> Option<CommandInfo> {
        self.entries.read().await.get(name).cloned()
    }

    /// All commands sorted by name.
    pub async fn list(&self) -> Vec<CommandInfo> {
        self.entries.read().await.values().cloned().collect()
    }
}

struct PluginSlot {
    plugin: Arc<dyn Plugin>,
    active: bool,
}

/// Registered plugins in registration order and the commands they declared.
pub struct PluginRegistry {
    plugins: RwLock<Vec<PluginSlot>>,
    commands: Arc<CommandTable>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(Vec::new()),
            commands: Arc::new(CommandTable::new()),
        }
    }

    /// Appends a plugin. It becomes active on the next [`start_all`](Self::start_all).
    pub async fn register(&self, plugin: Arc<dyn Plugin>) {
        let mut plugins = self.plugins.write().await;
        info!(plugin = %plugin.name(), position = plugins.len(), "Plugin registered");
        plugins.push(PluginSlot {
            plugin,
            active: false,
        });
    }

    /// Starts every registered plugin that is not active, in registration order.
    ///
    /// Each pending plugin's `on_start` runs exactly once per call. Stops at the first failing
    /// plugin; plugins started before it stay active.
    pub async fn start_all(&self) -> Result<()> {
        let pending: Vec<(usize, Arc<dyn Plugin>)> = self
            .plugins
            .read()
            .await
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.active)
            .map(|(idx, slot)| (idx, slot.plugin.clone()))
            .collect();

        for (idx, plugin) in pending {
            plugin.on_start(self).await?;
            if let Some(slot) = self.plugins.write().await.get_mut(idx) {
                slot.active = true;
            }
            info!(plugin = %plugin.name(), "Plugin started");
        }
        Ok(())
    }

    /// Stops every active plugin in reverse registration order. Plugins stay registered.
    ///
    /// A plugin whose `on_stop` fails stays active and the remaining plugins are still stopped;
    /// the first failure is returned once every plugin has been asked.
    pub async fn stop_all(&self) -> Result<()> {
        let active: Vec<(usize, Arc<dyn Plugin>)> = self
            .plugins
            .read()
            .await
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(idx, slot)| (idx, slot.plugin.clone()))
            .collect();

        let mut first_error = None;
        for (idx, plugin) in active.into_iter().rev() {
            match plugin.on_stop(self).await {
                Ok(()) => {
                    if let Some(slot) = self.plugins.write().await.get_mut(idx) {
                        slot.active = false;
                    }
                    info!(plugin = %plugin.name(), "Plugin stopped");
                }
                Err(e) => {
                    error!(plugin = %plugin.name(), error = %e, "Plugin failed to stop, left active");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Declares `name` as owned by `owner`. An existing owner is replaced (last write wins).
    pub async fn register_command(&self, owner: &str, name: &str, help: &str) {
        match self.commands.register(owner, name, help).await {
            Some(previous) if previous.owner != owner => warn!(
                command = %name,
                previous_owner = %previous.owner,
                owner = %owner,
                "Command re-registered by another plugin"
            ),
            _ => debug!(command = %name, owner = %owner, "Command registered"),
        }
    }

    /// Removes `name` from the command table. Returns whether it was registered.
    pub async fn unregister_command(&self, name: &str) -> bool {
        let removed = self.commands.unregister(name).await;
        debug!(command = %name, removed, "Command unregistered");
        removed
    }

    pub async fn is_command_registered(&self, name: &str) -> bool {
        self.commands.contains(name).await
    }

    /// Registered commands sorted by name.
    pub async fn commands(&self) -> Vec<CommandInfo> {
        self.commands.list().await
    }

    /// Shared handle to the command table.
    pub fn command_table(&self) -> Arc<CommandTable> {
        self.commands.clone()
    }

    /// Active plugins in registration order.
    pub async fn list_active_plugins(&self) -> Vec<Arc<dyn Plugin>> {
        self.plugins
            .read()
            .await
            .iter()
            .filter(|slot| slot.active)
            .map(|slot| slot.plugin.clone())
            .collect()
    }

    /// Names of all registered plugins (active or not) in registration order.
    pub async fn plugin_names(&self) -> Vec<String> {
        self.plugins
            .read()
            .await
            .iter()
            .map(|slot| slot.plugin.name().to_string())
            .collect()
    }
}
