//! Inbox entries and repository trait.
//!
//! Maps to the `inbox` table: a copy of each message delivered to a user,
//! keyed by (user_id, message_id).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::message::Message;
use super::user::User;
use crate::shared::error::RepositoryResult;

/// A message as stored in one user's inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    /// Owner of the inbox
    pub user_id: String,

    pub message: Message,
}

impl InboxMessage {
    pub fn new(user_id: impl Into<String>, message: Message) -> Self {
        Self {
            user_id: user_id.into(),
            message,
        }
    }
}

/// Repository trait for per-user inboxes.
#[async_trait]
pub trait InboxRepository: Send + Sync {
    /// Deliver a message to a user's inbox. Saving the same message again updates it.
    async fn save_message_for_user(&self, user: &User, message: &Message) -> RepositoryResult<()>;

    /// Messages in a user's inbox, newest first. An empty inbox and store
    /// errors both yield an empty list.
    async fn get_messages_for_user(&self, user_id: &str) -> RepositoryResult<Vec<Message>>;

    async fn contains_message_in_inbox(&self, user_id: &str, message_id: &str) -> RepositoryResult<bool>;

    async fn delete_message_for_user(&self, user_id: &str, message_id: &str) -> RepositoryResult<()>;

    async fn delete_all_messages_for_user(&self, user_id: &str) -> RepositoryResult<()>;

    /// Number of messages in a user's inbox.
    async fn count_inbox_for_user(&self, user_id: &str) -> RepositoryResult<i64>;
}
