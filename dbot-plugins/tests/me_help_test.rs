//! Integration tests for [`dbot_plugins::MePlugin`] and [`dbot_plugins::HelpPlugin`] through a
//! started registry and dispatcher.

mod common;

use std::sync::Arc;

use common::mock_bot::MockBot;
use common::{private_message, user};
use dbot_plugins::{HelpPlugin, MePlugin};
use plugin_registry::{DispatchOutcome, Dispatcher, PluginRegistry};

async fn dispatcher_with(bot: Arc<MockBot>) -> Dispatcher {
    let registry = Arc::new(PluginRegistry::new());
    registry
        .register(Arc::new(HelpPlugin::new(bot.clone(), registry.command_table())))
        .await;
    registry.register(Arc::new(MePlugin::new(bot))).await;
    registry.start_all().await.unwrap();
    Dispatcher::new(registry)
}

/// **Test: /me from alice (id 42) is claimed and the reply names her and her id.**
///
/// **Setup:** Registry with help and me, recording bot.
/// **Action:** Dispatch "/me" from user 42 "alice".
/// **Expected:** Claimed by me; one message sent to chat 42 containing "alice" and "42".
#[tokio::test]
async fn test_me_replies_with_name_and_id() {
    let bot = Arc::new(MockBot::new());
    let dispatcher = dispatcher_with(bot.clone()).await;

    let outcome = dispatcher
        .dispatch(&private_message(user(42, "alice"), "/me"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Claimed { plugin: "me".to_string() });
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 42);
    assert!(sent[0].text.contains("alice"));
    assert!(sent[0].text.contains("42"));
}

/// **Test: A failing send is returned as the dispatch error.**
#[tokio::test]
async fn test_me_send_failure_propagates() {
    let bot = Arc::new(MockBot::failing());
    let dispatcher = dispatcher_with(bot).await;

    let result = dispatcher
        .dispatch(&private_message(user(42, "alice"), "/me"))
        .await;

    assert!(matches!(result, Err(dbot_core::DbotError::Bot(_))));
}

/// **Test: Plain text is not claimed and nothing is sent.**
#[tokio::test]
async fn test_plain_text_unhandled() {
    let bot = Arc::new(MockBot::new());
    let dispatcher = dispatcher_with(bot.clone()).await;

    let outcome = dispatcher
        .dispatch(&private_message(user(42, "alice"), "me"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Unhandled);
    assert!(bot.sent().is_empty());
}

/// **Test: /help lists every registered command sorted by name; stopping clears them.**
#[tokio::test]
async fn test_help_lists_commands() {
    let bot = Arc::new(MockBot::new());
    let dispatcher = dispatcher_with(bot.clone()).await;

    let outcome = dispatcher
        .dispatch(&private_message(user(1, "carol"), "/help"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Claimed { plugin: "help".to_string() });
    assert_eq!(
        bot.last_text().unwrap(),
        "/help - List available commands\n/me - Show your name and Telegram id"
    );

    dispatcher.registry().stop_all().await.unwrap();
    assert!(dispatcher.registry().commands().await.is_empty());
}
