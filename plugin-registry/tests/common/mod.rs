//! Shared helpers for plugin-registry integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Chat, DbotError, Message, User};
use plugin_registry::{Plugin, PluginRegistry};

pub fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 42,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
            title: None,
        },
        created_at: Utc::now(),
    }
}

/// How a [`TestPlugin`] answers a message.
#[derive(Clone, Copy)]
pub enum Behavior {
    /// Claims messages whose command equals `command`.
    ClaimOwnCommand,
    /// Claims every message.
    ClaimAll,
    /// Never claims.
    Pass,
    /// Fails on every message.
    Fail,
}

/// Plugin that declares one command and records every call it receives.
pub struct TestPlugin {
    pub name: &'static str,
    pub command: Option<&'static str>,
    pub behavior: Behavior,
    pub handled: Arc<AtomicUsize>,
    pub starts: Arc<AtomicUsize>,
    pub stops: Arc<AtomicUsize>,
    pub fail_on_stop: bool,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl TestPlugin {
    pub fn new(
        name: &'static str,
        command: Option<&'static str>,
        behavior: Behavior,
        log: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        Self {
            name,
            command,
            behavior,
            handled: Arc::new(AtomicUsize::new(0)),
            starts: Arc::new(AtomicUsize::new(0)),
            stops: Arc::new(AtomicUsize::new(0)),
            fail_on_stop: false,
            log,
        }
    }

    /// Makes `on_stop` fail after recording the call, leaving the command registered.
    pub fn failing_stop(mut self) -> Self {
        self.fail_on_stop = true;
        self
    }

    pub fn handled(&self) -> usize {
        self.handled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Plugin for TestPlugin {
    fn name(&self) -> &str {
        self.name
    }

    async fn on_start(&self, registry: &PluginRegistry) -> dbot_core::Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("start_{}", self.name));
        if let Some(command) = self.command {
            registry.register_command(self.name, command, "test command").await;
        }
        Ok(())
    }

    async fn on_stop(&self, registry: &PluginRegistry) -> dbot_core::Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("stop_{}", self.name));
        if self.fail_on_stop {
            return Err(DbotError::Bot(format!("{} refused to stop", self.name)));
        }
        if let Some(command) = self.command {
            registry.unregister_command(command).await;
        }
        Ok(())
    }

    async fn handle(&self, message: &Message) -> dbot_core::Result<bool> {
        self.handled.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("handle_{}", self.name));
        match self.behavior {
            Behavior::ClaimOwnCommand => Ok(self.command.is_some() && message.command() == self.command),
            Behavior::ClaimAll => Ok(true),
            Behavior::Pass => Ok(false),
            Behavior::Fail => Err(DbotError::Bot(format!("{} failed", self.name))),
        }
    }
}

pub fn new_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}
