//! Message Repository Implementation
//!
//! SQL implementation of the MessageRepository trait. Messages are keyed by
//! their application and their own ID.

use std::sync::Arc;

use async_trait::async_trait;

use super::parse_id;
use crate::domain::services::request_assertions::{
    valid_application_id, valid_message, valid_message_id,
};
use crate::domain::{Message, MessageRepository};
use crate::infrastructure::database::{
    deletes, inserts, queries, Database, DatabaseSerializer, SqlValue, Statement,
};
use crate::shared::error::{RepositoryError, RepositoryResult};
use crate::shared::validation::non_empty_string;

/// SQL message repository implementation.
#[derive(Clone)]
pub struct SqlMessageRepository {
    database: Arc<dyn Database>,
    serializer: Arc<dyn DatabaseSerializer<Message>>,
}

impl SqlMessageRepository {
    pub fn new(database: Arc<dyn Database>, serializer: Arc<dyn DatabaseSerializer<Message>>) -> Self {
        Self { database, serializer }
    }

    /// Validate and convert the (application, message) key into parameters.
    fn key(application_id: &str, message_id: &str) -> RepositoryResult<Vec<SqlValue>> {
        let application = Self::application(application_id)?;
        valid_message_id()
            .check(message_id)
            .map_err(|e| e.in_field("message_id"))?;

        Ok(vec![
            application,
            SqlValue::Uuid(parse_id("message_id", message_id)?),
        ])
    }

    fn application(application_id: &str) -> RepositoryResult<SqlValue> {
        valid_application_id()
            .check(application_id)
            .map_err(|e| e.in_field("application_id"))?;

        Ok(SqlValue::Uuid(parse_id("application_id", application_id)?))
    }

    /// Application key plus one non-empty text filter.
    fn filtered(application_id: &str, name: &str, value: &str) -> RepositoryResult<Vec<SqlValue>> {
        let application = Self::application(application_id)?;
        non_empty_string().check(value).map_err(|e| e.in_field(name))?;

        Ok(vec![application, SqlValue::Text(value.to_string())])
    }

    /// Run a listing query. Store and decode failures yield an empty list.
    async fn list(&self, statement: Statement, parameters: Vec<SqlValue>) -> Vec<Message> {
        let rows = match self.database.fetch_all(statement, parameters).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(statement = %statement, error = %e, "Could not list messages");
                return Vec::new();
            }
        };

        rows.iter()
            .map(|row| self.serializer.deserialize(row))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| {
                tracing::warn!(statement = %statement, error = %e, "Could not read messages");
                Vec::new()
            })
    }
}

#[async_trait]
impl MessageRepository for SqlMessageRepository {
    async fn save_message(&self, message: &Message) -> RepositoryResult<()> {
        valid_message().check(message)?;

        self.serializer
            .save(message, inserts::MESSAGE, self.database.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(message_id = %message.message_id, error = %e, "Failed to save message");
                RepositoryError::operation_failed(
                    format!("Could not save message {}", message.message_id),
                    e,
                )
            })
    }

    async fn get_message(&self, application_id: &str, message_id: &str) -> RepositoryResult<Message> {
        let key = Self::key(application_id, message_id)?;

        let row = self
            .database
            .fetch_one(queries::SELECT_MESSAGE, key)
            .await
            .map_err(|e| {
                if !e.is_no_rows() {
                    tracing::error!(message_id = %message_id, error = %e, "Failed to query message");
                }
                RepositoryError::from_lookup(format!("message {}", message_id), e)
            })?;

        self.serializer.deserialize(&row).map_err(|e| {
            tracing::error!(message_id = %message_id, error = %e, "Failed to read message row");
            RepositoryError::operation_failed(format!("Could not read message {}", message_id), e)
        })
    }

    async fn delete_message(&self, application_id: &str, message_id: &str) -> RepositoryResult<()> {
        let key = Self::key(application_id, message_id)?;

        self.database
            .execute(deletes::MESSAGE, key)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(message_id = %message_id, error = %e, "Failed to delete message");
                RepositoryError::operation_failed(format!("Could not delete message {}", message_id), e)
            })
    }

    async fn contains_message(&self, application_id: &str, message_id: &str) -> RepositoryResult<bool> {
        let key = Self::key(application_id, message_id)?;

        self.database
            .fetch_one(queries::CHECK_MESSAGE, key)
            .await
            .and_then(|row| row.get_bool("present"))
            .map_err(|e| {
                tracing::error!(message_id = %message_id, error = %e, "Failed to check message");
                RepositoryError::operation_failed(format!("Could not check message {}", message_id), e)
            })
    }

    async fn get_messages_for_application(&self, application_id: &str) -> RepositoryResult<Vec<Message>> {
        let application = Self::application(application_id)?;

        Ok(self
            .list(queries::SELECT_MESSAGES_BY_APPLICATION, vec![application])
            .await)
    }

    async fn get_count_by_application(&self, application_id: &str) -> RepositoryResult<i64> {
        let application = Self::application(application_id)?;

        self.database
            .fetch_one(queries::COUNT_MESSAGES, vec![application])
            .await
            .and_then(|row| row.get_i64("total"))
            .map_err(|e| {
                tracing::error!(application_id = %application_id, error = %e, "Failed to count messages");
                RepositoryError::operation_failed(
                    format!("Could not count messages of application {}", application_id),
                    e,
                )
            })
    }

    async fn get_messages_by_hostname(
        &self,
        application_id: &str,
        hostname: &str,
    ) -> RepositoryResult<Vec<Message>> {
        let parameters = Self::filtered(application_id, "hostname", hostname)?;

        Ok(self.list(queries::SELECT_MESSAGES_BY_HOSTNAME, parameters).await)
    }

    async fn get_messages_by_title(&self, application_id: &str, title: &str) -> RepositoryResult<Vec<Message>> {
        let parameters = Self::filtered(application_id, "title", title)?;

        Ok(self.list(queries::SELECT_MESSAGES_BY_TITLE, parameters).await)
    }
}
