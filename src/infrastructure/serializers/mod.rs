//! Database Serializers
//!
//! One [`DatabaseSerializer`](crate::infrastructure::database::DatabaseSerializer)
//! per persisted entity. Each serializer lists its `COLUMNS` in the same order
//! as the parameters of its insert statement, and reads rows by those names.

pub mod inbox_serializer;
pub mod message_serializer;
pub mod organization_serializer;
pub mod user_serializer;

use uuid::Uuid;

use crate::infrastructure::database::{Row, SqlValue};
use crate::shared::error::StoreError;

pub use inbox_serializer::InboxSerializer;
pub use message_serializer::MessageSerializer;
pub use organization_serializer::OrganizationSerializer;
pub use user_serializer::UserSerializer;

/// Parse an identifier field into a UUID parameter.
pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(value).map_err(|e| StoreError::encode(field, e.to_string()))
}

/// Build a row from a column list and the matching parameters, the way the
/// store would return it after an insert.
pub fn row_from_parameters(columns: &[&str], parameters: Vec<SqlValue>) -> Row {
    columns
        .iter()
        .zip(parameters)
        .fold(Row::new(), |row, (column, value)| row.with(column, value))
}
