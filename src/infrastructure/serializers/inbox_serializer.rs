//! Inbox serializer.
//!
//! An inbox row is a message row with the owning user's ID in front.

use async_trait::async_trait;

use super::{parse_uuid, MessageSerializer};
use crate::domain::InboxMessage;
use crate::infrastructure::database::{Database, DatabaseSerializer, Row, SqlValue, Statement};
use crate::shared::error::StoreError;

/// Reads and writes [`InboxMessage`] rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct InboxSerializer;

impl InboxSerializer {
    /// Insert parameters, in order.
    pub const COLUMNS: [&'static str; 12] = [
        "user_id",
        "message_id",
        "app_id",
        "title",
        "body",
        "urgency",
        "hostname",
        "mac_address",
        "device_name",
        "time_created",
        "time_received",
        "app_name",
    ];

    pub fn parameters(entry: &InboxMessage) -> Result<Vec<SqlValue>, StoreError> {
        let mut parameters = vec![SqlValue::Uuid(parse_uuid("user_id", &entry.user_id)?)];
        parameters.extend(MessageSerializer::parameters(&entry.message)?);
        Ok(parameters)
    }
}

#[async_trait]
impl DatabaseSerializer<InboxMessage> for InboxSerializer {
    async fn save(&self, entry: &InboxMessage, statement: Statement, database: &dyn Database) -> Result<(), StoreError> {
        let parameters = Self::parameters(entry)?;
        database.execute(statement, parameters).await?;
        Ok(())
    }

    fn deserialize(&self, row: &Row) -> Result<InboxMessage, StoreError> {
        Ok(InboxMessage {
            user_id: row.get_uuid("user_id")?.to_string(),
            message: MessageSerializer.deserialize(row)?,
        })
    }
}
