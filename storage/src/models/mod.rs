//! Persisted record types.

mod groupchat;

pub use groupchat::{Groupchat, STATE_ACTIVE, STATE_CLOSED, STATE_PENDING};
