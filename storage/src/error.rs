//! Storage error types.
//!
//! Used by the record mapper, repository implementations and callers of storage APIs.

use thiserror::Error;

use crate::models::Groupchat;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Store access failed (connection, malformed statement, constraint, decode).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Result row does not fit the record description.
    #[error("Record mapping error: {0}")]
    Mapping(String),
    /// A group chat with the same platform id is already stored; carries the stored record.
    #[error("Already exists: {0}")]
    AlreadyExists(Box<Groupchat>),
}

impl StorageError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StorageError::AlreadyExists(_))
    }

    /// True when the store rejected a write because of a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}
