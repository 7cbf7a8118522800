//! Organization entity and repository trait.
//!
//! Maps to the `organizations` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::application::Tier;
use crate::shared::error::RepositoryResult;

/// An organization that groups applications and users.
///
/// Maps to the `organizations` table:
/// - org_id: UUID PRIMARY KEY
/// - org_name: TEXT NOT NULL
/// - owners: UUID[] NOT NULL DEFAULT '{}'
/// - icon_link, industry, contact_email, github_profile, stock_name,
///   description, website: TEXT NULL
/// - tier: VARCHAR(10) NOT NULL DEFAULT 'free'
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub organization_id: String,

    pub organization_name: Option<String>,

    /// User IDs of the organization's owners
    #[serde(default)]
    pub owners: Vec<String>,

    pub logo_link: Option<String>,

    pub industry: Option<String>,

    pub organization_email: Option<String>,

    pub github_profile: Option<String>,

    pub stock_market_symbol: Option<String>,

    #[serde(default)]
    pub tier: Tier,

    pub organization_description: Option<String>,

    pub website: Option<String>,
}

impl Organization {
    /// Create an organization with an identifier and a name.
    pub fn new(organization_id: impl Into<String>, organization_name: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            organization_name: Some(organization_name.into()),
            ..Self::default()
        }
    }
}

/// Repository trait for Organization data access operations.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Insert or update an organization.
    async fn save_organization(&self, organization: &Organization) -> RepositoryResult<()>;

    /// Get an organization by ID. Fails with `DoesNotExist` when absent.
    async fn get_organization(&self, organization_id: &str) -> RepositoryResult<Organization>;

    /// Delete an organization by ID.
    async fn delete_organization(&self, organization_id: &str) -> RepositoryResult<()>;

    /// Check whether an organization exists.
    async fn contains_organization(&self, organization_id: &str) -> RepositoryResult<bool>;

    /// Organizations whose name contains the search term, ignoring case.
    /// Store errors yield an empty list.
    async fn search_by_name(&self, term: &str) -> RepositoryResult<Vec<Organization>>;

    /// Add a user to an organization's members. Adding an existing member is a no-op.
    async fn save_member(&self, organization_id: &str, user_id: &str) -> RepositoryResult<()>;

    async fn is_member(&self, organization_id: &str, user_id: &str) -> RepositoryResult<bool>;

    /// User IDs of an organization's members. Store errors yield an empty list.
    async fn get_members(&self, organization_id: &str) -> RepositoryResult<Vec<String>>;

    async fn delete_member(&self, organization_id: &str, user_id: &str) -> RepositoryResult<()>;

    async fn delete_all_members(&self, organization_id: &str) -> RepositoryResult<()>;

    /// Remove one user from the organization's owners.
    async fn delete_owner(&self, organization_id: &str, user_id: &str) -> RepositoryResult<()>;

    /// Clear the organization's owners.
    async fn delete_all_owners(&self, organization_id: &str) -> RepositoryResult<()>;
}
