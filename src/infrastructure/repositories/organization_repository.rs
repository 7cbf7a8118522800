//! Organization Repository Implementation
//!
//! SQL implementation of the OrganizationRepository trait. Members live in
//! their own table; owners are an array column on the organization row.

use std::sync::Arc;

use async_trait::async_trait;

use super::parse_id;
use crate::domain::services::request_assertions::{
    valid_org_id, valid_organization, valid_user_id,
};
use crate::domain::{Organization, OrganizationRepository};
use crate::infrastructure::database::{
    deletes, inserts, queries, Database, DatabaseSerializer, SqlValue, Statement,
};
use crate::shared::error::{RepositoryError, RepositoryResult};
use crate::shared::validation::non_empty_string;

/// SQL organization repository implementation.
#[derive(Clone)]
pub struct SqlOrganizationRepository {
    database: Arc<dyn Database>,
    serializer: Arc<dyn DatabaseSerializer<Organization>>,
}

impl SqlOrganizationRepository {
    pub fn new(
        database: Arc<dyn Database>,
        serializer: Arc<dyn DatabaseSerializer<Organization>>,
    ) -> Self {
        Self { database, serializer }
    }

    fn id_parameter(organization_id: &str) -> RepositoryResult<Vec<SqlValue>> {
        valid_org_id()
            .check(organization_id)
            .map_err(|e| e.in_field("organization_id"))?;

        Ok(vec![SqlValue::Uuid(parse_id("organization_id", organization_id)?)])
    }

    /// Validate and convert an (organization, user) pair into parameters.
    fn membership(organization_id: &str, user_id: &str) -> RepositoryResult<Vec<SqlValue>> {
        let mut parameters = Self::id_parameter(organization_id)?;
        valid_user_id().check(user_id).map_err(|e| e.in_field("user_id"))?;
        parameters.push(SqlValue::Uuid(parse_id("user_id", user_id)?));

        Ok(parameters)
    }

    async fn run(
        &self,
        statement: Statement,
        parameters: Vec<SqlValue>,
        organization_id: &str,
    ) -> RepositoryResult<()> {
        self.database
            .execute(statement, parameters)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(
                    statement = %statement,
                    organization_id = %organization_id,
                    error = %e,
                    "Organization update failed"
                );
                RepositoryError::operation_failed(
                    format!("Could not run {} for organization {}", statement, organization_id),
                    e,
                )
            })
    }
}

#[async_trait]
impl OrganizationRepository for SqlOrganizationRepository {
    async fn save_organization(&self, organization: &Organization) -> RepositoryResult<()> {
        valid_organization().check(organization)?;

        self.serializer
            .save(organization, inserts::ORGANIZATION, self.database.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(
                    organization_id = %organization.organization_id,
                    error = %e,
                    "Failed to save organization"
                );
                RepositoryError::operation_failed(
                    format!("Could not save organization {}", organization.organization_id),
                    e,
                )
            })
    }

    async fn get_organization(&self, organization_id: &str) -> RepositoryResult<Organization> {
        let parameters = Self::id_parameter(organization_id)?;

        let row = self
            .database
            .fetch_one(queries::SELECT_ORGANIZATION, parameters)
            .await
            .map_err(|e| {
                if !e.is_no_rows() {
                    tracing::error!(organization_id = %organization_id, error = %e, "Failed to query organization");
                }
                RepositoryError::from_lookup(format!("organization {}", organization_id), e)
            })?;

        self.serializer.deserialize(&row).map_err(|e| {
            tracing::error!(organization_id = %organization_id, error = %e, "Failed to read organization row");
            RepositoryError::operation_failed(
                format!("Could not read organization {}", organization_id),
                e,
            )
        })
    }

    async fn delete_organization(&self, organization_id: &str) -> RepositoryResult<()> {
        let parameters = Self::id_parameter(organization_id)?;

        self.database
            .execute(deletes::ORGANIZATION, parameters)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(organization_id = %organization_id, error = %e, "Failed to delete organization");
                RepositoryError::operation_failed(
                    format!("Could not delete organization {}", organization_id),
                    e,
                )
            })
    }

    async fn contains_organization(&self, organization_id: &str) -> RepositoryResult<bool> {
        let parameters = Self::id_parameter(organization_id)?;

        self.database
            .fetch_one(queries::CHECK_ORGANIZATION, parameters)
            .await
            .and_then(|row| row.get_bool("present"))
            .map_err(|e| {
                tracing::error!(organization_id = %organization_id, error = %e, "Failed to check organization");
                RepositoryError::operation_failed(
                    format!("Could not check organization {}", organization_id),
                    e,
                )
            })
    }

    async fn search_by_name(&self, term: &str) -> RepositoryResult<Vec<Organization>> {
        non_empty_string().check(term).map_err(|e| e.in_field("term"))?;

        let rows = match self
            .database
            .fetch_all(queries::SEARCH_ORGANIZATIONS, vec![SqlValue::Text(term.to_string())])
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(term = %term, error = %e, "Could not search organizations");
                return Ok(Vec::new());
            }
        };

        Ok(rows
            .iter()
            .map(|row| self.serializer.deserialize(row))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| {
                tracing::warn!(term = %term, error = %e, "Could not read organizations");
                Vec::new()
            }))
    }

    async fn save_member(&self, organization_id: &str, user_id: &str) -> RepositoryResult<()> {
        let parameters = Self::membership(organization_id, user_id)?;

        self.run(inserts::ORGANIZATION_MEMBER, parameters, organization_id).await
    }

    async fn is_member(&self, organization_id: &str, user_id: &str) -> RepositoryResult<bool> {
        let parameters = Self::membership(organization_id, user_id)?;

        self.database
            .fetch_one(queries::CHECK_ORGANIZATION_MEMBER, parameters)
            .await
            .and_then(|row| row.get_bool("present"))
            .map_err(|e| {
                tracing::error!(organization_id = %organization_id, user_id = %user_id, error = %e, "Failed to check member");
                RepositoryError::operation_failed(
                    format!("Could not check member {} of organization {}", user_id, organization_id),
                    e,
                )
            })
    }

    async fn get_members(&self, organization_id: &str) -> RepositoryResult<Vec<String>> {
        let parameters = Self::id_parameter(organization_id)?;

        let rows = match self
            .database
            .fetch_all(queries::SELECT_ORGANIZATION_MEMBERS, parameters)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(organization_id = %organization_id, error = %e, "Could not list members");
                return Ok(Vec::new());
            }
        };

        Ok(rows
            .iter()
            .map(|row| row.get_uuid("user_id").map(|id| id.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| {
                tracing::warn!(organization_id = %organization_id, error = %e, "Could not read members");
                Vec::new()
            }))
    }

    async fn delete_member(&self, organization_id: &str, user_id: &str) -> RepositoryResult<()> {
        let parameters = Self::membership(organization_id, user_id)?;

        self.run(deletes::ORGANIZATION_MEMBER, parameters, organization_id).await
    }

    async fn delete_all_members(&self, organization_id: &str) -> RepositoryResult<()> {
        let parameters = Self::id_parameter(organization_id)?;

        self.run(deletes::ORGANIZATION_ALL_MEMBERS, parameters, organization_id).await
    }

    async fn delete_owner(&self, organization_id: &str, user_id: &str) -> RepositoryResult<()> {
        let parameters = Self::membership(organization_id, user_id)?;

        self.run(deletes::ORGANIZATION_OWNER, parameters, organization_id).await
    }

    async fn delete_all_owners(&self, organization_id: &str) -> RepositoryResult<()> {
        let parameters = Self::id_parameter(organization_id)?;

        self.run(deletes::ORGANIZATION_ALL_OWNERS, parameters, organization_id).await
    }
}
