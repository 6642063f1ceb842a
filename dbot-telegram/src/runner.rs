//! REPL runner: converts teloxide messages to core::Message and dispatches them to the plugins.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use plugin_registry::{DispatchOutcome, Dispatcher};
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Publishes the registered commands to Telegram so clients show them in the command menu.
pub async fn publish_commands(bot: &teloxide::Bot, dispatcher: &Dispatcher) {
    let commands: Vec<BotCommand> = dispatcher
        .registry()
        .commands()
        .await
        .into_iter()
        .map(|c| BotCommand::new(c.name, c.help))
        .collect();
    let count = commands.len();
    match bot.set_my_commands(commands).await {
        Ok(_) => info!(count, "Published bot commands"),
        Err(e) => warn!(error = %e, "Failed to publish bot commands"),
    }
}

/// Starts the REPL. Each message is converted and dispatched; the outcome is logged.
///
/// Dispatch errors are logged and do not stop the REPL.
#[instrument(skip(bot, dispatcher))]
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Dispatcher) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    publish_commands(&bot, &dispatcher).await;

    teloxide::repl(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let dispatcher = dispatcher.clone();

            async move {
                let core_msg = TelegramMessageWrapper(&msg).to_core();

                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    command = ?core_msg.command(),
                    "Received message"
                );

                match dispatcher.dispatch(&core_msg).await {
                    Ok(DispatchOutcome::Claimed { plugin }) => {
                        info!(user_id = core_msg.user.id, plugin = %plugin, "Message handled");
                    }
                    Ok(DispatchOutcome::Unhandled) => {
                        debug!(user_id = core_msg.user.id, "Message unhandled");
                    }
                    Err(e) => {
                        error!(error = %e, user_id = core_msg.user.id, chat_id = core_msg.chat.id, "Dispatch failed");
                    }
                }

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}
