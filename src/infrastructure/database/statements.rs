//! Named SQL statements.
//!
//! Every statement the repositories run is a constant here. Statements take
//! their inputs as bound parameters (`$1`, `$2`, ...); nothing is built by
//! string concatenation. Column lists match the serializers' parameter order.

use std::fmt;

/// A named, parameterized SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Statement {
    /// Short name used in logs
    pub name: &'static str,

    /// SQL text with positional parameters
    pub sql: &'static str,
}

impl Statement {
    pub const fn new(name: &'static str, sql: &'static str) -> Self {
        Self { name, sql }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Insert-or-update statements. Parameter order matches each serializer's `COLUMNS`.
pub mod inserts {
    use super::Statement;

    pub const USER: Statement = Statement::new(
        "insert_user",
        r#"
        INSERT INTO users (user_id, first_name, middle_name, last_name, email,
                           github_profile, profile_image_id, roles, birth_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (user_id) DO UPDATE
        SET first_name = EXCLUDED.first_name,
            middle_name = EXCLUDED.middle_name,
            last_name = EXCLUDED.last_name,
            email = EXCLUDED.email,
            github_profile = EXCLUDED.github_profile,
            profile_image_id = EXCLUDED.profile_image_id,
            roles = EXCLUDED.roles,
            birth_date = EXCLUDED.birth_date
        "#,
    );

    pub const MESSAGE: Statement = Statement::new(
        "insert_message",
        r#"
        INSERT INTO messages (message_id, app_id, title, body, urgency, hostname,
                              mac_address, device_name, time_created, time_received, app_name)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, NOW()), $11)
        ON CONFLICT (app_id, message_id) DO UPDATE
        SET title = EXCLUDED.title,
            body = EXCLUDED.body,
            urgency = EXCLUDED.urgency,
            hostname = EXCLUDED.hostname,
            mac_address = EXCLUDED.mac_address,
            device_name = EXCLUDED.device_name,
            time_created = EXCLUDED.time_created,
            app_name = EXCLUDED.app_name
        "#,
    );

    pub const ORGANIZATION: Statement = Statement::new(
        "insert_organization",
        r#"
        INSERT INTO organizations (org_id, org_name, owners, icon_link, industry, contact_email,
                                   github_profile, stock_name, tier, description, website)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (org_id) DO UPDATE
        SET org_name = EXCLUDED.org_name,
            owners = EXCLUDED.owners,
            icon_link = EXCLUDED.icon_link,
            industry = EXCLUDED.industry,
            contact_email = EXCLUDED.contact_email,
            github_profile = EXCLUDED.github_profile,
            stock_name = EXCLUDED.stock_name,
            tier = EXCLUDED.tier,
            description = EXCLUDED.description,
            website = EXCLUDED.website
        "#,
    );

    pub const ORGANIZATION_MEMBER: Statement = Statement::new(
        "insert_organization_member",
        r#"
        INSERT INTO organization_members (org_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (org_id, user_id) DO NOTHING
        "#,
    );

    pub const INBOX_MESSAGE: Statement = Statement::new(
        "insert_inbox_message",
        r#"
        INSERT INTO inbox (user_id, message_id, app_id, title, body, urgency, hostname,
                           mac_address, device_name, time_created, time_received, app_name)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, NOW()), $12)
        ON CONFLICT (user_id, message_id) DO UPDATE
        SET app_id = EXCLUDED.app_id,
            title = EXCLUDED.title,
            body = EXCLUDED.body,
            urgency = EXCLUDED.urgency,
            hostname = EXCLUDED.hostname,
            mac_address = EXCLUDED.mac_address,
            device_name = EXCLUDED.device_name,
            time_created = EXCLUDED.time_created,
            app_name = EXCLUDED.app_name
        "#,
    );
}

/// Read statements.
pub mod queries {
    use super::Statement;

    pub const SELECT_USER: Statement = Statement::new(
        "select_user",
        r#"
        SELECT user_id, first_name, middle_name, last_name, email, github_profile,
               profile_image_id, roles, birth_date, time_joined
        FROM users
        WHERE user_id = $1
        "#,
    );

    pub const SELECT_USER_BY_EMAIL: Statement = Statement::new(
        "select_user_by_email",
        r#"
        SELECT user_id, first_name, middle_name, last_name, email, github_profile,
               profile_image_id, roles, birth_date, time_joined
        FROM users
        WHERE email = $1
        "#,
    );

    pub const SELECT_USER_BY_GITHUB: Statement = Statement::new(
        "select_user_by_github",
        r#"
        SELECT user_id, first_name, middle_name, last_name, email, github_profile,
               profile_image_id, roles, birth_date, time_joined
        FROM users
        WHERE github_profile = $1
        "#,
    );

    pub const SELECT_RECENT_USERS: Statement = Statement::new(
        "select_recent_users",
        r#"
        SELECT user_id, first_name, middle_name, last_name, email, github_profile,
               profile_image_id, roles, birth_date, time_joined
        FROM users
        ORDER BY time_joined DESC
        LIMIT 200
        "#,
    );

    pub const CHECK_USER: Statement = Statement::new(
        "check_user",
        "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1) AS present",
    );

    pub const SELECT_MESSAGE: Statement = Statement::new(
        "select_message",
        r#"
        SELECT message_id, app_id, title, body, urgency, hostname, mac_address,
               device_name, time_created, time_received, app_name
        FROM messages
        WHERE app_id = $1 AND message_id = $2
        "#,
    );

    pub const SELECT_MESSAGES_BY_APPLICATION: Statement = Statement::new(
        "select_messages_by_application",
        r#"
        SELECT message_id, app_id, title, body, urgency, hostname, mac_address,
               device_name, time_created, time_received, app_name
        FROM messages
        WHERE app_id = $1
        ORDER BY time_received DESC
        "#,
    );

    pub const SELECT_MESSAGES_BY_HOSTNAME: Statement = Statement::new(
        "select_messages_by_hostname",
        r#"
        SELECT message_id, app_id, title, body, urgency, hostname, mac_address,
               device_name, time_created, time_received, app_name
        FROM messages
        WHERE app_id = $1 AND hostname = $2
        ORDER BY time_received DESC
        "#,
    );

    pub const SELECT_MESSAGES_BY_TITLE: Statement = Statement::new(
        "select_messages_by_title",
        r#"
        SELECT message_id, app_id, title, body, urgency, hostname, mac_address,
               device_name, time_created, time_received, app_name
        FROM messages
        WHERE app_id = $1 AND title = $2
        ORDER BY time_received DESC
        "#,
    );

    pub const CHECK_MESSAGE: Statement = Statement::new(
        "check_message",
        "SELECT EXISTS(SELECT 1 FROM messages WHERE app_id = $1 AND message_id = $2) AS present",
    );

    pub const COUNT_MESSAGES: Statement = Statement::new(
        "count_messages",
        "SELECT COUNT(*) AS total FROM messages WHERE app_id = $1",
    );

    pub const SELECT_ORGANIZATION: Statement = Statement::new(
        "select_organization",
        r#"
        SELECT org_id, org_name, owners, icon_link, industry, contact_email,
               github_profile, stock_name, tier, description, website
        FROM organizations
        WHERE org_id = $1
        "#,
    );

    pub const CHECK_ORGANIZATION: Statement = Statement::new(
        "check_organization",
        "SELECT EXISTS(SELECT 1 FROM organizations WHERE org_id = $1) AS present",
    );

    pub const SEARCH_ORGANIZATIONS: Statement = Statement::new(
        "search_organizations",
        r#"
        SELECT org_id, org_name, owners, icon_link, industry, contact_email,
               github_profile, stock_name, tier, description, website
        FROM organizations
        WHERE strpos(lower(org_name), lower($1)) > 0
        ORDER BY org_name
        "#,
    );

    pub const SELECT_ORGANIZATION_MEMBERS: Statement = Statement::new(
        "select_organization_members",
        "SELECT user_id FROM organization_members WHERE org_id = $1 ORDER BY user_id",
    );

    pub const CHECK_ORGANIZATION_MEMBER: Statement = Statement::new(
        "check_organization_member",
        r#"
        SELECT EXISTS(
            SELECT 1 FROM organization_members WHERE org_id = $1 AND user_id = $2
        ) AS present
        "#,
    );

    pub const SELECT_INBOX: Statement = Statement::new(
        "select_inbox",
        r#"
        SELECT user_id, message_id, app_id, title, body, urgency, hostname, mac_address,
               device_name, time_created, time_received, app_name
        FROM inbox
        WHERE user_id = $1
        ORDER BY time_received DESC
        "#,
    );

    pub const CHECK_INBOX_MESSAGE: Statement = Statement::new(
        "check_inbox_message",
        "SELECT EXISTS(SELECT 1 FROM inbox WHERE user_id = $1 AND message_id = $2) AS present",
    );

    pub const COUNT_INBOX: Statement = Statement::new(
        "count_inbox",
        "SELECT COUNT(*) AS total FROM inbox WHERE user_id = $1",
    );
}

/// Delete statements.
pub mod deletes {
    use super::Statement;

    pub const USER: Statement = Statement::new("delete_user", "DELETE FROM users WHERE user_id = $1");

    pub const MESSAGE: Statement = Statement::new(
        "delete_message",
        "DELETE FROM messages WHERE app_id = $1 AND message_id = $2",
    );

    pub const ORGANIZATION: Statement = Statement::new(
        "delete_organization",
        "DELETE FROM organizations WHERE org_id = $1",
    );

    pub const ORGANIZATION_MEMBER: Statement = Statement::new(
        "delete_organization_member",
        "DELETE FROM organization_members WHERE org_id = $1 AND user_id = $2",
    );

    pub const ORGANIZATION_ALL_MEMBERS: Statement = Statement::new(
        "delete_organization_all_members",
        "DELETE FROM organization_members WHERE org_id = $1",
    );

    /// Owners live in an array column, so removing one is an update.
    pub const ORGANIZATION_OWNER: Statement = Statement::new(
        "delete_organization_owner",
        "UPDATE organizations SET owners = array_remove(owners, $2) WHERE org_id = $1",
    );

    pub const ORGANIZATION_ALL_OWNERS: Statement = Statement::new(
        "delete_organization_all_owners",
        "UPDATE organizations SET owners = '{}' WHERE org_id = $1",
    );

    pub const INBOX_MESSAGE: Statement = Statement::new(
        "delete_inbox_message",
        "DELETE FROM inbox WHERE user_id = $1 AND message_id = $2",
    );

    pub const INBOX_ALL_MESSAGES: Statement = Statement::new(
        "delete_inbox_all_messages",
        "DELETE FROM inbox WHERE user_id = $1",
    );
}
