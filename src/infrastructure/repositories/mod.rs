//! Repository Implementations
//!
//! SQL implementations of the domain repository traits. Every operation
//! validates its inputs, then runs one named statement through a
//! [`Database`](crate::infrastructure::database::Database) and maps rows with
//! a [`DatabaseSerializer`](crate::infrastructure::database::DatabaseSerializer).
//!
//! ## Available Repositories
//!
//! - **SqlUserRepository** - users, lookups by email and GitHub profile
//! - **SqlMessageRepository** - messages keyed by application
//! - **SqlOrganizationRepository** - organizations, members, owners and name search
//! - **SqlInboxRepository** - per-user copies of delivered messages
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aroma_data::infrastructure::database::PgDatabase;
//! use aroma_data::infrastructure::repositories::SqlUserRepository;
//! use aroma_data::infrastructure::serializers::UserSerializer;
//!
//! let database = Arc::new(PgDatabase::new(pool));
//! let users = SqlUserRepository::new(database, Arc::new(UserSerializer));
//! ```

pub mod inbox_repository;
pub mod message_repository;
pub mod organization_repository;
pub mod user_repository;

use uuid::Uuid;

use crate::shared::error::{RepositoryError, RepositoryResult};

pub use inbox_repository::SqlInboxRepository;
pub use message_repository::SqlMessageRepository;
pub use organization_repository::SqlOrganizationRepository;
pub use user_repository::SqlUserRepository;

/// Convert an already validated identifier into its UUID form.
fn parse_id(field: &str, value: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| RepositoryError::InvalidArgument(format!("{}: {}", field, e)))
}

#[cfg(test)]
pub(crate) use log_capture::capture_logs;
