//! Storage crate: generic record mapping over SQLite and group-chat persistence.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`mapper`] – Record descriptions and generic list/object queries
//! - [`models`] – Groupchat
//! - [`groupchat_repo`] – GroupchatRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod groupchat_repo;
pub mod mapper;
mod models;
mod sqlite_pool;


pub use error::StorageError;
pub use groupchat_repo::GroupchatRepository;
pub use mapper::{
    execute, placeholders, query_list, query_object, query_optional, Record, RecordDescription,
    RowReader, SqlArg,
};
pub use models::{Groupchat, STATE_ACTIVE, STATE_CLOSED, STATE_PENDING};
pub use sqlite_pool::SqlitePoolManager;
