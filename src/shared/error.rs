//! Error Types
//!
//! Centralized error handling for validation and persistence.
//!
//! Callers of a repository only ever observe [`RepositoryError`]. Native store
//! failures are represented by [`StoreError`] and are always carried as the
//! `source` of [`RepositoryError::OperationFailed`], never returned directly.

/// A violated assertion.
///
/// Produced by [`Assertion::check`](super::validation::Assertion::check) when
/// a value does not satisfy the predicate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FailedAssertion {
    message: String,
}

impl FailedAssertion {
    /// Create a new violation with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable violation message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with the name of the field that was being checked.
    pub fn in_field(self, field: &str) -> Self {
        Self {
            message: format!("{}: {}", field, self.message),
        }
    }
}

/// Failure reported by the underlying store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The statement matched no rows.
    #[error("no matching row")]
    NoRows,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A row was returned but a column could not be decoded into the expected type.
    #[error("could not decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    /// An entity field could not be converted into a statement parameter.
    #[error("could not encode field '{field}': {reason}")]
    Encode { field: String, reason: String },

    #[error("column '{0}' missing from row")]
    MissingColumn(String),
}

impl StoreError {
    /// Shorthand for a decode failure on a named column.
    pub fn decode(column: &str, reason: impl Into<String>) -> Self {
        Self::Decode {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an encode failure on a named field.
    pub fn encode(field: &str, reason: impl Into<String>) -> Self {
        Self::Encode {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this failure is the store's "no matching row" signal.
    pub fn is_no_rows(&self) -> bool {
        match self {
            Self::NoRows => true,
            Self::Sqlx(sqlx::Error::RowNotFound) => true,
            _ => false,
        }
    }
}

/// Repository error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// An input failed validation before the store was contacted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A point lookup found no matching row.
    #[error("Does not exist: {0}")]
    DoesNotExist(String),

    /// The store reported a failure.
    #[error("Operation failed: {message}")]
    OperationFailed {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl RepositoryError {
    /// Wrap a store failure.
    pub fn operation_failed(message: impl Into<String>, source: StoreError) -> Self {
        Self::OperationFailed {
            message: message.into(),
            source,
        }
    }

    /// Classify a store failure from a point lookup.
    ///
    /// `NoRows` becomes [`RepositoryError::DoesNotExist`]; everything else is
    /// an [`RepositoryError::OperationFailed`].
    pub fn from_lookup(what: impl Into<String>, source: StoreError) -> Self {
        if source.is_no_rows() {
            Self::DoesNotExist(what.into())
        } else {
            Self::operation_failed(format!("Could not get {}", what.into()), source)
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_does_not_exist(&self) -> bool {
        matches!(self, Self::DoesNotExist(_))
    }

    pub fn is_operation_failed(&self) -> bool {
        matches!(self, Self::OperationFailed { .. })
    }
}

impl From<FailedAssertion> for RepositoryError {
    fn from(violation: FailedAssertion) -> Self {
        Self::InvalidArgument(violation.message)
    }
}

/// Result alias used by repositories.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
