//! Organization serializer.

use async_trait::async_trait;

use super::parse_uuid;
use crate::domain::{Organization, Tier};
use crate::infrastructure::database::{Database, DatabaseSerializer, Row, SqlValue, Statement};
use crate::shared::error::StoreError;

/// Reads and writes [`Organization`] rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationSerializer;

impl OrganizationSerializer {
    /// Insert parameters, in order.
    pub const COLUMNS: [&'static str; 11] = [
        "org_id",
        "org_name",
        "owners",
        "icon_link",
        "industry",
        "contact_email",
        "github_profile",
        "stock_name",
        "tier",
        "description",
        "website",
    ];

    pub fn parameters(organization: &Organization) -> Result<Vec<SqlValue>, StoreError> {
        let owners = organization
            .owners
            .iter()
            .map(|owner| parse_uuid("owners", owner))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vec![
            SqlValue::Uuid(parse_uuid("organization_id", &organization.organization_id)?),
            SqlValue::text_or_null(organization.organization_name.as_deref()),
            SqlValue::UuidArray(owners),
            SqlValue::text_or_null(organization.logo_link.as_deref()),
            SqlValue::text_or_null(organization.industry.as_deref()),
            SqlValue::text_or_null(organization.organization_email.as_deref()),
            SqlValue::text_or_null(organization.github_profile.as_deref()),
            SqlValue::text_or_null(organization.stock_market_symbol.as_deref()),
            SqlValue::Text(organization.tier.as_str().to_string()),
            SqlValue::text_or_null(organization.organization_description.as_deref()),
            SqlValue::text_or_null(organization.website.as_deref()),
        ])
    }
}

#[async_trait]
impl DatabaseSerializer<Organization> for OrganizationSerializer {
    async fn save(
        &self,
        organization: &Organization,
        statement: Statement,
        database: &dyn Database,
    ) -> Result<(), StoreError> {
        let parameters = Self::parameters(organization)?;
        database.execute(statement, parameters).await?;
        Ok(())
    }

    fn deserialize(&self, row: &Row) -> Result<Organization, StoreError> {
        let tier = match row.get_optional_text("tier")? {
            Some(name) => Tier::from_str(&name).unwrap_or_else(|| {
                tracing::warn!(tier = %name, "Unknown tier, using default");
                Tier::default()
            }),
            None => Tier::default(),
        };

        Ok(Organization {
            organization_id: row.get_uuid("org_id")?.to_string(),
            organization_name: row.get_optional_text("org_name")?,
            owners: row
                .get_uuid_array("owners")?
                .into_iter()
                .map(|owner| owner.to_string())
                .collect(),
            logo_link: row.get_optional_text("icon_link")?,
            industry: row.get_optional_text("industry")?,
            organization_email: row.get_optional_text("contact_email")?,
            github_profile: row.get_optional_text("github_profile")?,
            stock_market_symbol: row.get_optional_text("stock_name")?,
            tier,
            organization_description: row.get_optional_text("description")?,
            website: row.get_optional_text("website")?,
        })
    }
}
