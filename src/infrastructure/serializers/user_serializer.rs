//! User serializer.

use async_trait::async_trait;

use super::parse_uuid;
use crate::domain::{Role, User};
use crate::infrastructure::database::{Database, DatabaseSerializer, Row, SqlValue, Statement};
use crate::shared::error::StoreError;

/// Reads and writes [`User`] rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSerializer;

impl UserSerializer {
    /// Insert parameters, in order.
    pub const COLUMNS: [&'static str; 9] = [
        "user_id",
        "first_name",
        "middle_name",
        "last_name",
        "email",
        "github_profile",
        "profile_image_id",
        "roles",
        "birth_date",
    ];

    pub fn parameters(user: &User) -> Result<Vec<SqlValue>, StoreError> {
        let roles = user.roles.iter().map(|role| role.as_str().to_string()).collect();

        Ok(vec![
            SqlValue::Uuid(parse_uuid("user_id", &user.user_id)?),
            SqlValue::text_or_null(user.first_name.as_deref()),
            SqlValue::text_or_null(user.middle_name.as_deref()),
            SqlValue::text_or_null(user.last_name.as_deref()),
            SqlValue::text_or_null(user.email.as_deref()),
            SqlValue::text_or_null(user.github_profile.as_deref()),
            SqlValue::text_or_null(user.profile_image_id.as_deref()),
            SqlValue::TextArray(roles),
            SqlValue::timestamp_or_null(user.birth_date),
        ])
    }
}

#[async_trait]
impl DatabaseSerializer<User> for UserSerializer {
    async fn save(&self, user: &User, statement: Statement, database: &dyn Database) -> Result<(), StoreError> {
        let parameters = Self::parameters(user)?;
        database.execute(statement, parameters).await?;
        Ok(())
    }

    fn deserialize(&self, row: &Row) -> Result<User, StoreError> {
        let roles = row
            .get_text_array("roles")?
            .into_iter()
            .filter_map(|name| {
                let role = Role::from_str(&name);
                if role.is_none() {
                    tracing::warn!(role = %name, "Dropping unknown role");
                }
                role
            })
            .collect();

        Ok(User {
            user_id: row.get_uuid("user_id")?.to_string(),
            first_name: row.get_optional_text("first_name")?,
            middle_name: row.get_optional_text("middle_name")?,
            last_name: row.get_optional_text("last_name")?,
            email: row.get_optional_text("email")?,
            github_profile: row.get_optional_text("github_profile")?,
            profile_image_id: row.get_optional_text("profile_image_id")?,
            roles,
            birth_date: row.get_optional_timestamp("birth_date")?,
            time_joined: row.get_optional_timestamp("time_joined")?,
        })
    }
}
