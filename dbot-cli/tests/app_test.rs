//! Integration tests for the `groupchats` listing ([`dbot_cli::groupchats_table`], [`dbot_cli::print_groupchats`]).

use dbot_cli::{groupchats_table, print_groupchats};
use storage::{Groupchat, GroupchatRepository, STATE_ACTIVE, STATE_CLOSED};

async fn seed(path: &str) {
    let repo = GroupchatRepository::new(path).await.unwrap();
    repo.insert_if_absent(
        Groupchat::new(-1001, "Rustaceans", STATE_ACTIVE).with_invite_link("https://t.me/+rust"),
    )
    .await
    .unwrap();
    repo.insert_if_absent(Groupchat::new(-1002, "Old Group", STATE_CLOSED))
        .await
        .unwrap();
}

/// **Test: An empty database renders the "no group chats" line.**
#[tokio::test]
async fn test_table_empty_database() {
    let table = groupchats_table("sqlite::memory:", &[]).await.unwrap();
    assert_eq!(table, "No group chats (database: sqlite::memory:).\n");
    print_groupchats("sqlite::memory:", &[]).await.unwrap();
}

/// **Test: Default listing shows only active chats, one row each.**
///
/// **Setup:** File database with one active and one closed chat.
/// **Action:** `groupchats_table` with no states.
/// **Expected:** Header, separator, and a single row with the active chat's id, title and link.
#[tokio::test]
async fn test_table_lists_active_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dbot.db");
    let path = path.to_str().unwrap();
    seed(path).await;

    let table = groupchats_table(path, &[]).await.unwrap();
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id"));
    assert!(lines[0].contains("invite_link"));
    assert!(lines[2].contains("-1001"));
    assert!(lines[2].contains("Rustaceans"));
    assert!(lines[2].contains("https://t.me/+rust"));
    assert!(!table.contains("Old Group"));
}

/// **Test: Explicit states select rows ordered by state, chats without a link show "-".**
#[tokio::test]
async fn test_table_with_states() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dbot.db");
    let path = path.to_str().unwrap();
    seed(path).await;

    let states = vec![STATE_ACTIVE.to_string(), STATE_CLOSED.to_string()];
    let table = groupchats_table(path, &states).await.unwrap();
    let rows: Vec<&str> = table.lines().skip(2).collect();

    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("Rustaceans"));
    assert!(rows[1].contains("Old Group"));
    assert!(rows[1].trim_end().ends_with('-'));
    print_groupchats(path, &states).await.unwrap();
}
