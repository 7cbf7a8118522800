//! User Repository Implementation
//!
//! SQL implementation of the UserRepository trait. Statements run through a
//! [`Database`]; rows are mapped by a [`DatabaseSerializer`] so both can be
//! replaced in tests.

use std::sync::Arc;

use async_trait::async_trait;

use super::parse_id;
use crate::domain::services::request_assertions::{valid_user, valid_user_id};
use crate::domain::{User, UserRepository};
use crate::infrastructure::database::{
    deletes, inserts, queries, Database, DatabaseSerializer, SqlValue, Statement,
};
use crate::shared::error::{RepositoryError, RepositoryResult};
use crate::shared::validation::{non_empty_string, valid_email};

/// SQL user repository implementation.
///
/// Holds no per-call state; one instance can serve concurrent callers.
#[derive(Clone)]
pub struct SqlUserRepository {
    database: Arc<dyn Database>,
    serializer: Arc<dyn DatabaseSerializer<User>>,
}

impl SqlUserRepository {
    /// Create a new SqlUserRepository over the given store and serializer.
    pub fn new(database: Arc<dyn Database>, serializer: Arc<dyn DatabaseSerializer<User>>) -> Self {
        Self { database, serializer }
    }

    /// Run a point lookup and map the single row to a user.
    async fn fetch_user(
        &self,
        statement: Statement,
        parameter: SqlValue,
        what: String,
    ) -> RepositoryResult<User> {
        let row = self
            .database
            .fetch_one(statement, vec![parameter])
            .await
            .map_err(|e| {
                if !e.is_no_rows() {
                    tracing::error!(statement = %statement, error = %e, "Failed to query user");
                }
                RepositoryError::from_lookup(what.clone(), e)
            })?;

        self.serializer.deserialize(&row).map_err(|e| {
            tracing::error!(statement = %statement, error = %e, "Failed to read user row");
            RepositoryError::operation_failed(format!("Could not read {}", what), e)
        })
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn save_user(&self, user: &User) -> RepositoryResult<()> {
        valid_user().check(user)?;

        self.serializer
            .save(user, inserts::USER, self.database.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.user_id, error = %e, "Failed to save user");
                RepositoryError::operation_failed(format!("Could not save user {}", user.user_id), e)
            })?;

        tracing::debug!(user_id = %user.user_id, "Saved user");
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> RepositoryResult<User> {
        valid_user_id().check(user_id)?;
        let id = parse_id("user_id", user_id)?;

        self.fetch_user(queries::SELECT_USER, SqlValue::Uuid(id), format!("user {}", user_id))
            .await
    }

    async fn delete_user(&self, user_id: &str) -> RepositoryResult<()> {
        valid_user_id().check(user_id)?;
        let id = parse_id("user_id", user_id)?;

        let deleted = self
            .database
            .execute(deletes::USER, vec![SqlValue::Uuid(id)])
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to delete user");
                RepositoryError::operation_failed(format!("Could not delete user {}", user_id), e)
            })?;

        tracing::debug!(user_id = %user_id, rows = deleted, "Deleted user");
        Ok(())
    }

    async fn contains_user(&self, user_id: &str) -> RepositoryResult<bool> {
        valid_user_id().check(user_id)?;
        let id = parse_id("user_id", user_id)?;

        self.database
            .fetch_one(queries::CHECK_USER, vec![SqlValue::Uuid(id)])
            .await
            .and_then(|row| row.get_bool("present"))
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to check user");
                RepositoryError::operation_failed(format!("Could not check user {}", user_id), e)
            })
    }

    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<User> {
        valid_email().check(email).map_err(|e| e.in_field("email"))?;

        self.fetch_user(
            queries::SELECT_USER_BY_EMAIL,
            SqlValue::Text(email.to_string()),
            format!("user with email {}", email),
        )
        .await
    }

    async fn find_by_github_profile(&self, github_profile: &str) -> RepositoryResult<User> {
        non_empty_string()
            .check(github_profile)
            .map_err(|e| e.in_field("github_profile"))?;

        self.fetch_user(
            queries::SELECT_USER_BY_GITHUB,
            SqlValue::Text(github_profile.to_string()),
            format!("user with GitHub profile {}", github_profile),
        )
        .await
    }

    async fn get_recently_created_users(&self) -> Vec<User> {
        let rows = match self.database.fetch_all(queries::SELECT_RECENT_USERS, Vec::new()).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "Could not list recent users, returning none");
                return Vec::new();
            }
        };

        match rows.iter().map(|row| self.serializer.deserialize(row)).collect() {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read recent users, returning none");
                Vec::new()
            }
        }
    }
}
