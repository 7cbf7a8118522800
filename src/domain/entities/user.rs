//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryResult;

/// Role a user plays within the service, stored as VARCHAR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Developer,
    ProductManager,
    QualityAssurance,
    Ops,
    Manager,
    Reporter,
}

impl Role {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "developer" => Some(Self::Developer),
            "product_manager" => Some(Self::ProductManager),
            "quality_assurance" => Some(Self::QualityAssurance),
            "ops" => Some(Self::Ops),
            "manager" => Some(Self::Manager),
            "reporter" => Some(Self::Reporter),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::ProductManager => "product_manager",
            Self::QualityAssurance => "quality_assurance",
            Self::Ops => "ops",
            Self::Manager => "manager",
            Self::Reporter => "reporter",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a user account.
///
/// Maps to the `users` table:
/// - user_id: UUID PRIMARY KEY
/// - first_name, middle_name, last_name: TEXT NULL
/// - email: TEXT NULL UNIQUE
/// - github_profile: TEXT NULL
/// - profile_image_id: TEXT NULL
/// - roles: TEXT[] NOT NULL DEFAULT '{}'
/// - birth_date: TIMESTAMPTZ NULL
/// - time_joined: TIMESTAMPTZ NOT NULL DEFAULT NOW() (store-assigned)
///
/// `user_id` is kept as a string because it arrives unvalidated from
/// requests; repositories only accept it once it parses as a UUID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,

    pub first_name: Option<String>,

    pub middle_name: Option<String>,

    pub last_name: Option<String>,

    pub email: Option<String>,

    /// GitHub profile handle or URL
    pub github_profile: Option<String>,

    pub profile_image_id: Option<String>,

    #[serde(default)]
    pub roles: Vec<Role>,

    pub birth_date: Option<DateTime<Utc>>,

    /// Set by the store when the row is first inserted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_joined: Option<DateTime<Utc>>,
}

impl User {
    /// Create a user with only its identifier set.
    pub fn with_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Full name made of whichever name parts are set, separated by spaces.
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Repository trait for User data access operations.
///
/// Implementations validate their arguments before touching the store and
/// report failures using the repository error taxonomy.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user.
    async fn save_user(&self, user: &User) -> RepositoryResult<()>;

    /// Get a user by ID. Fails with `DoesNotExist` when absent.
    async fn get_user(&self, user_id: &str) -> RepositoryResult<User>;

    /// Delete a user by ID.
    async fn delete_user(&self, user_id: &str) -> RepositoryResult<()>;

    /// Check whether a user with this ID exists.
    async fn contains_user(&self, user_id: &str) -> RepositoryResult<bool>;

    /// Get a user by email. Fails with `DoesNotExist` when absent.
    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<User>;

    /// Get a user by GitHub profile. Fails with `DoesNotExist` when absent.
    async fn find_by_github_profile(&self, github_profile: &str) -> RepositoryResult<User>;

    /// Most recently created users. Never fails; store errors yield an empty list.
    async fn get_recently_created_users(&self) -> Vec<User>;
}
