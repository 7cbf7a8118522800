//! Inbox Repository Implementation
//!
//! SQL implementation of the InboxRepository trait. Each entry is a copy of a
//! message keyed by the receiving user and the message ID.

use std::sync::Arc;

use async_trait::async_trait;

use super::parse_id;
use crate::domain::services::request_assertions::{
    valid_message, valid_message_id, valid_user, valid_user_id,
};
use crate::domain::{InboxMessage, InboxRepository, Message, User};
use crate::infrastructure::database::{
    deletes, inserts, queries, Database, DatabaseSerializer, SqlValue,
};
use crate::shared::error::{RepositoryError, RepositoryResult};

/// SQL inbox repository implementation.
#[derive(Clone)]
pub struct SqlInboxRepository {
    database: Arc<dyn Database>,
    serializer: Arc<dyn DatabaseSerializer<InboxMessage>>,
}

impl SqlInboxRepository {
    pub fn new(
        database: Arc<dyn Database>,
        serializer: Arc<dyn DatabaseSerializer<InboxMessage>>,
    ) -> Self {
        Self { database, serializer }
    }

    fn user(user_id: &str) -> RepositoryResult<SqlValue> {
        valid_user_id().check(user_id).map_err(|e| e.in_field("user_id"))?;

        Ok(SqlValue::Uuid(parse_id("user_id", user_id)?))
    }

    fn key(user_id: &str, message_id: &str) -> RepositoryResult<Vec<SqlValue>> {
        let user = Self::user(user_id)?;
        valid_message_id()
            .check(message_id)
            .map_err(|e| e.in_field("message_id"))?;

        Ok(vec![user, SqlValue::Uuid(parse_id("message_id", message_id)?)])
    }
}

#[async_trait]
impl InboxRepository for SqlInboxRepository {
    async fn save_message_for_user(&self, user: &User, message: &Message) -> RepositoryResult<()> {
        valid_user().check(user).map_err(|e| e.in_field("user"))?;
        valid_message().check(message).map_err(|e| e.in_field("message"))?;

        let entry = InboxMessage::new(user.user_id.clone(), message.clone());

        self.serializer
            .save(&entry, inserts::INBOX_MESSAGE, self.database.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.user_id,
                    message_id = %message.message_id,
                    error = %e,
                    "Failed to save inbox message"
                );
                RepositoryError::operation_failed(
                    format!("Could not save message {} for user {}", message.message_id, user.user_id),
                    e,
                )
            })
    }

    async fn get_messages_for_user(&self, user_id: &str) -> RepositoryResult<Vec<Message>> {
        let user = Self::user(user_id)?;

        let rows = match self.database.fetch_all(queries::SELECT_INBOX, vec![user]).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Could not list inbox");
                return Ok(Vec::new());
            }
        };

        Ok(rows
            .iter()
            .map(|row| self.serializer.deserialize(row).map(|entry| entry.message))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| {
                tracing::warn!(user_id = %user_id, error = %e, "Could not read inbox");
                Vec::new()
            }))
    }

    async fn contains_message_in_inbox(&self, user_id: &str, message_id: &str) -> RepositoryResult<bool> {
        let key = Self::key(user_id, message_id)?;

        self.database
            .fetch_one(queries::CHECK_INBOX_MESSAGE, key)
            .await
            .and_then(|row| row.get_bool("present"))
            .map_err(|e| {
                tracing::error!(user_id = %user_id, message_id = %message_id, error = %e, "Failed to check inbox");
                RepositoryError::operation_failed(
                    format!("Could not check message {} for user {}", message_id, user_id),
                    e,
                )
            })
    }

    async fn delete_message_for_user(&self, user_id: &str, message_id: &str) -> RepositoryResult<()> {
        let key = Self::key(user_id, message_id)?;

        self.database
            .execute(deletes::INBOX_MESSAGE, key)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(user_id = %user_id, message_id = %message_id, error = %e, "Failed to delete inbox message");
                RepositoryError::operation_failed(
                    format!("Could not delete message {} for user {}", message_id, user_id),
                    e,
                )
            })
    }

    async fn delete_all_messages_for_user(&self, user_id: &str) -> RepositoryResult<()> {
        let user = Self::user(user_id)?;

        self.database
            .execute(deletes::INBOX_ALL_MESSAGES, vec![user])
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to clear inbox");
                RepositoryError::operation_failed(format!("Could not clear inbox of user {}", user_id), e)
            })
    }

    async fn count_inbox_for_user(&self, user_id: &str) -> RepositoryResult<i64> {
        let user = Self::user(user_id)?;

        self.database
            .fetch_one(queries::COUNT_INBOX, vec![user])
            .await
            .and_then(|row| row.get_i64("total"))
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to count inbox");
                RepositoryError::operation_failed(format!("Could not count inbox of user {}", user_id), e)
            })
    }
}
