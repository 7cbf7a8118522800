//! Store-independent rows and parameter values.
//!
//! Serializers read and write [`SqlValue`]s instead of driver types, so they
//! can be exercised against in-memory rows. [`PgDatabase`](super::PgDatabase)
//! converts between these and PostgreSQL values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::error::StoreError;

/// Column type of a value. Used to bind typed NULLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Bool,
    Int,
    Text,
    Uuid,
    Timestamp,
    Bytes,
    TextArray,
    UuidArray,
}

impl SqlType {
    /// Map a PostgreSQL type name to a column type.
    pub fn from_pg_name(name: &str) -> Option<Self> {
        match name {
            "BOOL" => Some(Self::Bool),
            "INT2" | "INT4" | "INT8" => Some(Self::Int),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Some(Self::Text),
            "UUID" => Some(Self::Uuid),
            "TIMESTAMPTZ" | "TIMESTAMP" => Some(Self::Timestamp),
            "BYTEA" => Some(Self::Bytes),
            "TEXT[]" | "VARCHAR[]" => Some(Self::TextArray),
            "UUID[]" => Some(Self::UuidArray),
            _ => None,
        }
    }
}

/// A bound parameter or a decoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null(SqlType),
    Bool(bool),
    Int(i64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
    TextArray(Vec<String>),
    UuidArray(Vec<Uuid>),
}

impl SqlValue {
    /// Text value, or a typed NULL when absent.
    pub fn text_or_null(value: Option<&str>) -> Self {
        value.map_or(Self::Null(SqlType::Text), |value| Self::Text(value.to_string()))
    }

    /// Timestamp value, or a typed NULL when absent.
    pub fn timestamp_or_null(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Null(SqlType::Timestamp), Self::Timestamp)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Null(_) => "NULL",
            Self::Bool(_) => "BOOL",
            Self::Int(_) => "INT",
            Self::Text(_) => "TEXT",
            Self::Uuid(_) => "UUID",
            Self::Timestamp(_) => "TIMESTAMPTZ",
            Self::Bytes(_) => "BYTEA",
            Self::TextArray(_) => "TEXT[]",
            Self::UuidArray(_) => "UUID[]",
        }
    }
}

/// A result row: column values by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: &str, value: SqlValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: SqlValue) {
        self.columns.insert(column.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The raw value of a column.
    pub fn get(&self, column: &str) -> Result<&SqlValue, StoreError> {
        self.columns
            .get(column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))
    }

    pub fn get_uuid(&self, column: &str) -> Result<Uuid, StoreError> {
        match self.get(column)? {
            SqlValue::Uuid(value) => Ok(*value),
            SqlValue::Text(value) => Uuid::parse_str(value)
                .map_err(|e| StoreError::decode(column, e.to_string())),
            other => Err(unexpected(column, "UUID", other)),
        }
    }

    pub fn get_text(&self, column: &str) -> Result<String, StoreError> {
        self.get_optional_text(column)?
            .ok_or_else(|| StoreError::decode(column, "unexpected NULL"))
    }

    pub fn get_optional_text(&self, column: &str) -> Result<Option<String>, StoreError> {
        match self.get(column)? {
            SqlValue::Text(value) => Ok(Some(value.clone())),
            SqlValue::Null(_) => Ok(None),
            other => Err(unexpected(column, "TEXT", other)),
        }
    }

    pub fn get_bool(&self, column: &str) -> Result<bool, StoreError> {
        match self.get(column)? {
            SqlValue::Bool(value) => Ok(*value),
            other => Err(unexpected(column, "BOOL", other)),
        }
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, StoreError> {
        match self.get(column)? {
            SqlValue::Int(value) => Ok(*value),
            other => Err(unexpected(column, "INT", other)),
        }
    }

    pub fn get_optional_timestamp(&self, column: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        match self.get(column)? {
            SqlValue::Timestamp(value) => Ok(Some(*value)),
            SqlValue::Null(_) => Ok(None),
            other => Err(unexpected(column, "TIMESTAMPTZ", other)),
        }
    }

    /// A text array column. NULL reads as an empty array.
    pub fn get_text_array(&self, column: &str) -> Result<Vec<String>, StoreError> {
        match self.get(column)? {
            SqlValue::TextArray(values) => Ok(values.clone()),
            SqlValue::Null(_) => Ok(Vec::new()),
            other => Err(unexpected(column, "TEXT[]", other)),
        }
    }

    /// A UUID array column. NULL reads as an empty array.
    pub fn get_uuid_array(&self, column: &str) -> Result<Vec<Uuid>, StoreError> {
        match self.get(column)? {
            SqlValue::UuidArray(values) => Ok(values.clone()),
            SqlValue::Null(_) => Ok(Vec::new()),
            other => Err(unexpected(column, "UUID[]", other)),
        }
    }
}

fn unexpected(column: &str, expected: &str, actual: &SqlValue) -> StoreError {
    StoreError::decode(
        column,
        format!("expected {}, found {}", expected, actual.type_name()),
    )
}
