//! Bot bootstrap and the group chat listing command.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dbot_core::{init_tracing, Bot};
use dbot_plugins::register_default_plugins;
use dbot_telegram::{run_repl, BotConfig, TelegramBotAdapter};
use plugin_registry::{Dispatcher, PluginRegistry};
use storage::{Groupchat, GroupchatRepository};
use tracing::info;

/// Runs the bot until the REPL exits: opens the database, registers and starts the plugins,
/// runs the Telegram REPL, then stops the plugins.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(Some(Path::new(&config.log_file)), "info")
        .with_context(|| format!("Initialize logging to {}", config.log_file))?;

    info!(database_url = %config.database_url, log_file = %config.log_file, "Starting dbot");

    let repo = GroupchatRepository::new(&config.database_url)
        .await
        .with_context(|| format!("Open database {}", config.database_url))?;

    let telegram = config.teloxide_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(telegram.clone()));

    let registry = Arc::new(PluginRegistry::new());
    register_default_plugins(&registry, bot, repo).await;
    registry.start_all().await.context("Start plugins")?;

    let dispatcher = Dispatcher::new(registry.clone());
    let result = run_repl(telegram, dispatcher).await;

    registry.stop_all().await.context("Stop plugins")?;
    info!("dbot stopped");
    result
}

/// Prints stored group chats in `(state, title)` order.
pub async fn print_groupchats(database_url: &str, states: &[String]) -> Result<()> {
    print!("{}", groupchats_table(database_url, states).await?);
    Ok(())
}

/// Renders the stored group chats whose state is in `states` (default `active`) as a text table.
pub async fn groupchats_table(database_url: &str, states: &[String]) -> Result<String> {
    let repo = GroupchatRepository::new(database_url)
        .await
        .with_context(|| format!("Open database {}", database_url))?;
    let groupchats = repo.list(states).await.context("List group chats")?;
    Ok(format_groupchats(database_url, &groupchats))
}

fn format_groupchats(database_url: &str, groupchats: &[Groupchat]) -> String {
    if groupchats.is_empty() {
        return format!("No group chats (database: {}).\n", database_url);
    }

    let mut out = format!(
        "{:<8} {:<16} {:<10} {:<20} {:<30} {}\n",
        "id", "telegram_id", "state", "created_at", "title", "invite_link"
    );
    out.push_str(&"-".repeat(110));
    out.push('\n');
    for g in groupchats {
        out.push_str(&format!(
            "{:<8} {:<16} {:<10} {:<20} {:<30} {}\n",
            g.id,
            g.platform_id,
            g.state,
            g.created_at.format("%Y-%m-%d %H:%M:%S"),
            g.title,
            g.invite_link.as_deref().unwrap_or("-")
        ));
    }
    out
}
