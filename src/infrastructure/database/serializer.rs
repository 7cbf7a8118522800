//! Serializer abstraction.
//!
//! A [`DatabaseSerializer`] knows how one entity type is written with a given
//! statement and how it is rebuilt from a result row. Serializers are
//! stateless and shared by every call a repository serves.

use async_trait::async_trait;

use super::row::Row;
use super::statements::Statement;
use super::store::Database;
use crate::shared::error::StoreError;

#[async_trait]
pub trait DatabaseSerializer<T: Sync>: Send + Sync {
    /// Write `entity` by running `statement` against `database`.
    async fn save(&self, entity: &T, statement: Statement, database: &dyn Database) -> Result<(), StoreError>;

    /// Rebuild an entity from a row.
    fn deserialize(&self, row: &Row) -> Result<T, StoreError>;
}
