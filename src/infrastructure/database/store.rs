//! Store access boundary.
//!
//! [`Database`] is the narrow capability repositories and serializers use to
//! run statements. [`PgDatabase`] is the PostgreSQL implementation; tests
//! substitute mocks or in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo, ValueRef};
use uuid::Uuid;

use super::row::{Row, SqlType, SqlValue};
use super::statements::Statement;
use crate::shared::error::StoreError;

/// Executes named statements with bound parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Database: Send + Sync {
    /// Run a write statement, returning the number of affected rows.
    async fn execute(&self, statement: Statement, params: Vec<SqlValue>) -> Result<u64, StoreError>;

    /// Run a query expected to return exactly one row.
    ///
    /// Returns [`StoreError::NoRows`] when nothing matched.
    async fn fetch_one(&self, statement: Statement, params: Vec<SqlValue>) -> Result<Row, StoreError>;

    /// Run a query returning any number of rows.
    async fn fetch_all(&self, statement: Statement, params: Vec<SqlValue>) -> Result<Vec<Row>, StoreError>;
}

/// PostgreSQL-backed [`Database`].
#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    /// Create a new PgDatabase with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn execute(&self, statement: Statement, params: Vec<SqlValue>) -> Result<u64, StoreError> {
        tracing::debug!(statement = statement.name, params = params.len(), "Executing statement");

        let result = bind_all(statement, params).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_one(&self, statement: Statement, params: Vec<SqlValue>) -> Result<Row, StoreError> {
        tracing::debug!(statement = statement.name, params = params.len(), "Fetching one row");

        let row = bind_all(statement, params)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NoRows)?;

        decode_row(&row)
    }

    async fn fetch_all(&self, statement: Statement, params: Vec<SqlValue>) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(statement = statement.name, params = params.len(), "Fetching rows");

        let rows = bind_all(statement, params).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }
}

fn bind_all(statement: Statement, params: Vec<SqlValue>) -> Query<'static, Postgres, PgArguments> {
    params
        .into_iter()
        .fold(sqlx::query(statement.sql), bind)
}

fn bind(
    query: Query<'static, Postgres, PgArguments>,
    value: SqlValue,
) -> Query<'static, Postgres, PgArguments> {
    match value {
        SqlValue::Bool(value) => query.bind(value),
        SqlValue::Int(value) => query.bind(value),
        SqlValue::Text(value) => query.bind(value),
        SqlValue::Uuid(value) => query.bind(value),
        SqlValue::Timestamp(value) => query.bind(value),
        SqlValue::Bytes(value) => query.bind(value),
        SqlValue::TextArray(value) => query.bind(value),
        SqlValue::UuidArray(value) => query.bind(value),
        SqlValue::Null(SqlType::Bool) => query.bind(None::<bool>),
        SqlValue::Null(SqlType::Int) => query.bind(None::<i64>),
        SqlValue::Null(SqlType::Text) => query.bind(None::<String>),
        SqlValue::Null(SqlType::Uuid) => query.bind(None::<Uuid>),
        SqlValue::Null(SqlType::Timestamp) => query.bind(None::<DateTime<Utc>>),
        SqlValue::Null(SqlType::Bytes) => query.bind(None::<Vec<u8>>),
        SqlValue::Null(SqlType::TextArray) => query.bind(None::<Vec<String>>),
        SqlValue::Null(SqlType::UuidArray) => query.bind(None::<Vec<Uuid>>),
    }
}

/// Convert a PostgreSQL row into a [`Row`], decoding each column by its type name.
fn decode_row(row: &PgRow) -> Result<Row, StoreError> {
    let mut decoded = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let name = column.name();
        let type_name = column.type_info().name();

        let sql_type = SqlType::from_pg_name(type_name)
            .ok_or_else(|| StoreError::decode(name, format!("unsupported column type {}", type_name)))?;

        let value = if row.try_get_raw(index)?.is_null() {
            SqlValue::Null(sql_type)
        } else {
            match (sql_type, type_name) {
                (SqlType::Bool, _) => SqlValue::Bool(row.try_get(index)?),
                (SqlType::Int, "INT2") => SqlValue::Int(i64::from(row.try_get::<i16, _>(index)?)),
                (SqlType::Int, "INT4") => SqlValue::Int(i64::from(row.try_get::<i32, _>(index)?)),
                (SqlType::Int, _) => SqlValue::Int(row.try_get(index)?),
                (SqlType::Text, _) => SqlValue::Text(row.try_get(index)?),
                (SqlType::Uuid, _) => SqlValue::Uuid(row.try_get(index)?),
                (SqlType::Timestamp, "TIMESTAMP") => {
                    SqlValue::Timestamp(row.try_get::<NaiveDateTime, _>(index)?.and_utc())
                }
                (SqlType::Timestamp, _) => SqlValue::Timestamp(row.try_get(index)?),
                (SqlType::Bytes, _) => SqlValue::Bytes(row.try_get(index)?),
                (SqlType::TextArray, _) => SqlValue::TextArray(row.try_get(index)?),
                (SqlType::UuidArray, _) => SqlValue::UuidArray(row.try_get(index)?),
            }
        };

        decoded.insert(name, value);
    }

    Ok(decoded)
}
