//! Group chat repository: persistence and queries for group chats.
//!
//! Uses SqlitePoolManager and the record mapper; owns the SQL text for the `groupchats` table.
//! The UNIQUE constraint on `telegram_id` is the authoritative guard against duplicate chats;
//! the lookup in `insert_if_absent` only saves a round trip in the common case.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::mapper::{execute, placeholders, query_list, query_object, Record, SqlArg};
use crate::models::{Groupchat, STATE_ACTIVE};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct GroupchatRepository {
    pool_manager: SqlitePoolManager,
}

impl GroupchatRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool_manager(pool_manager).await
    }

    /// Wraps an existing pool and makes sure the table exists.
    pub async fn with_pool_manager(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating groupchats table if not exist");

        let pool = self.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS groupchats (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL DEFAULT '',
                telegram_id INTEGER NOT NULL UNIQUE,
                state TEXT NOT NULL DEFAULT '',
                invite_link TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_groupchats_state ON groupchats(state)")
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Returns the underlying pool, for callers running their own mapped queries.
    pub fn pool(&self) -> &SqlitePool {
        self.pool_manager.pool()
    }

    /// Group chats whose state is one of `states` (defaults to `["active"]`), ordered by state, title.
    pub async fn list(&self, states: &[String]) -> Result<Vec<Groupchat>, StorageError> {
        let args: Vec<SqlArg> = if states.is_empty() {
            vec![SqlArg::from(STATE_ACTIVE)]
        } else {
            states.iter().map(|s| SqlArg::Text(s.clone())).collect()
        };

        let sql = format!(
            "SELECT {} FROM groupchats WHERE state IN ({}) ORDER BY state, title",
            Groupchat::description().column_list(),
            placeholders(args.len())
        );

        let groupchats = query_list::<Groupchat>(self.pool(), &sql, &args).await?;
        debug!(states = ?states, count = groupchats.len(), "Listed groupchats");
        Ok(groupchats)
    }

    /// Looks up a chat by Telegram id. Not found yields an empty record (see [`Groupchat::is_empty`]).
    pub async fn find_by_platform_id(&self, platform_id: i64) -> Result<Groupchat, StorageError> {
        let sql = format!(
            "SELECT {} FROM groupchats WHERE telegram_id = ?",
            Groupchat::description().column_list()
        );
        query_object::<Groupchat>(self.pool(), &sql, &[SqlArg::Int(platform_id)]).await
    }

    /// Stores `candidate` unless a chat with the same platform id and a non-empty state exists.
    ///
    /// On success returns the candidate with the generated `id` and `created_at` set. When the chat
    /// is already stored, fails with [`StorageError::AlreadyExists`] carrying the stored record.
    pub async fn insert_if_absent(
        &self,
        mut candidate: Groupchat,
    ) -> Result<Groupchat, StorageError> {
        let existing = self.find_by_platform_id(candidate.platform_id).await?;
        if !existing.is_empty() {
            debug!(platform_id = existing.platform_id, id = existing.id, "Groupchat already exists");
            return Err(StorageError::AlreadyExists(Box::new(existing)));
        }

        let created_at = Utc::now();
        let result = execute(
            self.pool(),
            "INSERT INTO groupchats (title, telegram_id, invite_link, state, created_at) VALUES (?, ?, ?, ?, ?)",
            &[
                SqlArg::Text(candidate.title.clone()),
                SqlArg::Int(candidate.platform_id),
                SqlArg::OptText(candidate.invite_link.clone()),
                SqlArg::Text(candidate.state.clone()),
                SqlArg::Timestamp(created_at),
            ],
        )
        .await;

        let result = match result {
            Ok(result) => result,
            Err(e) if e.is_unique_violation() => {
                warn!(
                    platform_id = candidate.platform_id,
                    "Groupchat inserted concurrently, reporting stored record"
                );
                let stored = self.find_by_platform_id(candidate.platform_id).await?;
                return Err(StorageError::AlreadyExists(Box::new(stored)));
            }
            Err(e) => return Err(e),
        };

        candidate.id = result.last_insert_rowid();
        candidate.created_at = created_at;

        info!(
            title = %candidate.title,
            id = candidate.id,
            created_at = %candidate.created_at,
            "Groupchat added"
        );
        Ok(candidate)
    }

    /// Sets `invite_link` for the chat with `groupchat.platform_id`. Returns the number of rows changed.
    pub async fn update_invite_link(&self, groupchat: &Groupchat) -> Result<u64, StorageError> {
        let result = execute(
            self.pool(),
            "UPDATE groupchats SET invite_link = ? WHERE telegram_id = ?",
            &[
                SqlArg::OptText(groupchat.invite_link.clone()),
                SqlArg::Int(groupchat.platform_id),
            ],
        )
        .await?;
        debug!(platform_id = groupchat.platform_id, rows = result.rows_affected(), "Updated invite link");
        Ok(result.rows_affected())
    }

    /// Sets `title` for the chat with `groupchat.platform_id`. Returns the number of rows changed.
    pub async fn update_title(&self, groupchat: &Groupchat) -> Result<u64, StorageError> {
        let result = execute(
            self.pool(),
            "UPDATE groupchats SET title = ? WHERE telegram_id = ?",
            &[
                SqlArg::Text(groupchat.title.clone()),
                SqlArg::Int(groupchat.platform_id),
            ],
        )
        .await?;
        debug!(platform_id = groupchat.platform_id, rows = result.rows_affected(), "Updated title");
        Ok(result.rows_affected())
    }
}
