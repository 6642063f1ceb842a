//! # Plugin registry
//!
//! Holds the plugins of a bot in registration order together with the table of commands they
//! declared, and dispatches each inbound message to the first active plugin that claims it.

mod dispatcher;
mod plugin;
mod registry;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use plugin::Plugin;
pub use registry::{CommandInfo, CommandTable, PluginRegistry};

// Integration tests live in tests/registry_test.rs and tests/dispatcher_test.rs
