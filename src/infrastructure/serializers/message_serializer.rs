//! Message serializer.

use async_trait::async_trait;

use super::parse_uuid;
use crate::domain::{Message, Urgency};
use crate::infrastructure::database::{Database, DatabaseSerializer, Row, SqlValue, Statement};
use crate::shared::error::StoreError;

/// Reads and writes [`Message`] rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageSerializer;

impl MessageSerializer {
    /// Insert parameters, in order. A NULL `time_received` is filled in by the store.
    pub const COLUMNS: [&'static str; 11] = [
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

    pub fn parameters(message: &Message) -> Result<Vec<SqlValue>, StoreError> {
        Ok(vec![
            SqlValue::Uuid(parse_uuid("message_id", &message.message_id)?),
            SqlValue::Uuid(parse_uuid("application_id", &message.application_id)?),
            SqlValue::text_or_null(message.title.as_deref()),
            SqlValue::text_or_null(message.body.as_deref()),
            SqlValue::Text(message.urgency.as_str().to_string()),
            SqlValue::text_or_null(message.hostname.as_deref()),
            SqlValue::text_or_null(message.mac_address.as_deref()),
            SqlValue::text_or_null(message.device_name.as_deref()),
            SqlValue::timestamp_or_null(message.time_of_creation),
            SqlValue::timestamp_or_null(message.time_message_received),
            SqlValue::text_or_null(message.application_name.as_deref()),
        ])
    }
}

#[async_trait]
impl DatabaseSerializer<Message> for MessageSerializer {
    async fn save(&self, message: &Message, statement: Statement, database: &dyn Database) -> Result<(), StoreError> {
        let parameters = Self::parameters(message)?;
        database.execute(statement, parameters).await?;
        Ok(())
    }

    fn deserialize(&self, row: &Row) -> Result<Message, StoreError> {
        let urgency = row
            .get_optional_text("urgency")?
            .map(|urgency| Urgency::from_str(&urgency))
            .unwrap_or_default();

        Ok(Message {
            message_id: row.get_uuid("message_id")?.to_string(),
            application_id: row.get_uuid("app_id")?.to_string(),
            title: row.get_optional_text("title")?,
            body: row.get_optional_text("body")?,
            urgency,
            hostname: row.get_optional_text("hostname")?,
            mac_address: row.get_optional_text("mac_address")?,
            device_name: row.get_optional_text("device_name")?,
            time_of_creation: row.get_optional_timestamp("time_created")?,
            time_message_received: row.get_optional_timestamp("time_received")?,
            application_name: row.get_optional_text("app_name")?,
        })
    }
}
