//! Common Test Utilities
//!
//! Shared fixtures and an in-memory [`Database`] that understands the
//! statements the repositories issue.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use fake::faker::chrono::en::DateTimeBefore;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use parking_lot::Mutex;
use uuid::Uuid;

use aroma_data::domain::{Message, Organization, Role, Tier, Urgency, User};
use aroma_data::infrastructure::database::{Database, Row, SqlValue, Statement};
use aroma_data::infrastructure::repositories::{
    SqlInboxRepository, SqlMessageRepository, SqlOrganizationRepository, SqlUserRepository,
};
use aroma_data::infrastructure::serializers::{
    row_from_parameters, InboxSerializer, MessageSerializer, OrganizationSerializer, UserSerializer,
};
use aroma_data::shared::error::StoreError;

/// Rows of one table, keyed by their primary key values.
#[derive(Default)]
struct Table {
    rows: Vec<(Vec<SqlValue>, Row)>,
}

impl Table {
    fn find(&self, key: &[SqlValue]) -> Option<&Row> {
        self.rows.iter().find(|(k, _)| k == key).map(|(_, row)| row)
    }

    fn find_mut(&mut self, key: &[SqlValue]) -> Option<&mut Row> {
        self.rows.iter_mut().find(|(k, _)| k == key).map(|(_, row)| row)
    }

    /// Upsert that stamps `time_received` on first insert and keeps it afterwards.
    fn upsert_received(&mut self, key: Vec<SqlValue>, mut row: Row) {
        let received = self
            .find(&key)
            .and_then(|existing| existing.get("time_received").ok().cloned())
            .or_else(|| row.get("time_received").ok().filter(|v| !v.is_null()).cloned())
            .unwrap_or_else(|| SqlValue::Timestamp(Utc::now()));
        row.insert("time_received", received);
        self.upsert(key, row);
    }

    fn upsert(&mut self, key: Vec<SqlValue>, row: Row) {
        match self.rows.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = row,
            None => self.rows.push((key, row)),
        }
    }

    fn remove(&mut self, key: &[SqlValue]) -> u64 {
        let before = self.rows.len();
        self.rows.retain(|(k, _)| k != key);
        (before - self.rows.len()) as u64
    }

    fn matching<'a>(&'a self, column: &'a str, value: &'a SqlValue) -> impl Iterator<Item = &'a Row> {
        self.rows
            .iter()
            .map(|(_, row)| row)
            .filter(move |row| row.get(column).map(|v| v == value).unwrap_or(false))
    }
}

/// In-memory store.
///
/// Store-assigned columns (`time_joined`, `time_received`) are filled in on
/// first insert and kept on later upserts, as the SQL schema does.
#[derive(Default)]
pub struct MemoryDatabase {
    tables: Mutex<HashMap<&'static str, Table>>,
    failing: AtomicBool,
    log: Mutex<Vec<&'static str>>,
}

impl MemoryDatabase {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following call fail with a connection error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Names of the statements run so far.
    pub fn statements(&self) -> Vec<&'static str> {
        self.log.lock().clone()
    }

    fn run(&self, statement: Statement, params: Vec<SqlValue>) -> Result<Vec<Row>, StoreError> {
        self.log.lock().push(statement.name);

        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        let mut tables = self.tables.lock();

        let rows = match statement.name {
            "insert_user" => {
                let key = vec![params[0].clone()];
                let joined = tables
                    .entry("users")
                    .or_default()
                    .find(&key)
                    .and_then(|row| row.get("time_joined").ok().cloned())
                    .unwrap_or_else(|| SqlValue::Timestamp(Utc::now()));
                let row = row_from_parameters(&UserSerializer::COLUMNS, params).with("time_joined", joined);
                tables.entry("users").or_default().upsert(key, row);
                Vec::new()
            }
            "select_user" => lookup(tables.entry("users").or_default(), &params)?,
            "select_user_by_email" => tables
                .entry("users")
                .or_default()
                .matching("email", &params[0])
                .cloned()
                .collect(),
            "select_user_by_github" => tables
                .entry("users")
                .or_default()
                .matching("github_profile", &params[0])
                .cloned()
                .collect(),
            "select_recent_users" => {
                let mut rows: Vec<Row> = tables
                    .entry("users")
                    .or_default()
                    .rows
                    .iter()
                    .map(|(_, row)| row.clone())
                    .collect();
                rows.sort_by_key(|row| std::cmp::Reverse(row.get_optional_timestamp("time_joined").ok().flatten()));
                rows
            }
            "check_user" => presence(tables.entry("users").or_default(), &params),
            "delete_user" => affected(tables.entry("users").or_default().remove(&params)),

            "insert_message" => {
                let key = vec![params[1].clone(), params[0].clone()];
                let row = row_from_parameters(&MessageSerializer::COLUMNS, params);
                tables.entry("messages").or_default().upsert_received(key, row);
                Vec::new()
            }
            "select_message" => lookup(tables.entry("messages").or_default(), &params)?,
            "select_messages_by_application" => tables
                .entry("messages")
                .or_default()
                .matching("app_id", &params[0])
                .cloned()
                .collect(),
            "select_messages_by_hostname" => filtered(tables.entry("messages").or_default(), "hostname", &params),
            "select_messages_by_title" => filtered(tables.entry("messages").or_default(), "title", &params),
            "check_message" => presence(tables.entry("messages").or_default(), &params),
            "count_messages" => {
                let total = tables.entry("messages").or_default().matching("app_id", &params[0]).count();
                vec![Row::new().with("total", SqlValue::Int(total as i64))]
            }
            "delete_message" => affected(tables.entry("messages").or_default().remove(&params)),

            "insert_organization" => {
                let key = vec![params[0].clone()];
                let row = row_from_parameters(&OrganizationSerializer::COLUMNS, params);
                tables.entry("organizations").or_default().upsert(key, row);
                Vec::new()
            }
            "select_organization" => lookup(tables.entry("organizations").or_default(), &params)?,
            "check_organization" => presence(tables.entry("organizations").or_default(), &params),
            "delete_organization" => affected(tables.entry("organizations").or_default().remove(&params)),
            "search_organizations" => {
                let term = match &params[0] {
                    SqlValue::Text(term) => term.to_lowercase(),
                    _ => String::new(),
                };
                tables
                    .entry("organizations")
                    .or_default()
                    .rows
                    .iter()
                    .map(|(_, row)| row)
                    .filter(|row| {
                        row.get_optional_text("org_name")
                            .ok()
                            .flatten()
                            .map(|name| name.to_lowercase().contains(&term))
                            .unwrap_or(false)
                    })
                    .cloned()
                    .collect()
            }
            "delete_organization_owner" => {
                let table = tables.entry("organizations").or_default();
                match table.find_mut(&params[..1]) {
                    Some(row) => {
                        let owners = row
                            .get_uuid_array("owners")?
                            .into_iter()
                            .filter(|owner| SqlValue::Uuid(*owner) != params[1])
                            .collect();
                        row.insert("owners", SqlValue::UuidArray(owners));
                        affected(1)
                    }
                    None => affected(0),
                }
            }
            "delete_organization_all_owners" => match tables.entry("organizations").or_default().find_mut(&params) {
                Some(row) => {
                    row.insert("owners", SqlValue::UuidArray(Vec::new()));
                    affected(1)
                }
                None => affected(0),
            },

            "insert_organization_member" => {
                let row = Row::new()
                    .with("org_id", params[0].clone())
                    .with("user_id", params[1].clone());
                tables.entry("organization_members").or_default().upsert(params, row);
                Vec::new()
            }
            "select_organization_members" => {
                let mut rows: Vec<Row> = tables
                    .entry("organization_members")
                    .or_default()
                    .matching("org_id", &params[0])
                    .cloned()
                    .collect();
                rows.sort_by_key(|row| row.get_uuid("user_id").ok());
                rows
            }
            "check_organization_member" => presence(tables.entry("organization_members").or_default(), &params),
            "delete_organization_member" => affected(tables.entry("organization_members").or_default().remove(&params)),
            "delete_organization_all_members" => {
                let table = tables.entry("organization_members").or_default();
                let before = table.rows.len();
                table.rows.retain(|(key, _)| key[0] != params[0]);
                affected((before - table.rows.len()) as u64)
            }

            "insert_inbox_message" => {
                let key = vec![params[0].clone(), params[1].clone()];
                let row = row_from_parameters(&InboxSerializer::COLUMNS, params);
                tables.entry("inbox").or_default().upsert_received(key, row);
                Vec::new()
            }
            "select_inbox" => {
                let mut rows: Vec<Row> = tables
                    .entry("inbox")
                    .or_default()
                    .matching("user_id", &params[0])
                    .cloned()
                    .collect();
                rows.sort_by_key(|row| std::cmp::Reverse(row.get_optional_timestamp("time_received").ok().flatten()));
                rows
            }
            "check_inbox_message" => presence(tables.entry("inbox").or_default(), &params),
            "count_inbox" => {
                let total = tables.entry("inbox").or_default().matching("user_id", &params[0]).count();
                vec![Row::new().with("total", SqlValue::Int(total as i64))]
            }
            "delete_inbox_message" => affected(tables.entry("inbox").or_default().remove(&params)),
            "delete_inbox_all_messages" => {
                let table = tables.entry("inbox").or_default();
                let before = table.rows.len();
                table.rows.retain(|(key, _)| key[0] != params[0]);
                affected((before - table.rows.len()) as u64)
            }

            other => {
                return Err(StoreError::Sqlx(sqlx::Error::Protocol(format!(
                    "unknown statement {}",
                    other
                ))))
            }
        };

        Ok(rows)
    }
}

fn lookup(table: &Table, key: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
    table.find(key).cloned().map(|row| vec![row]).ok_or(StoreError::NoRows)
}

fn filtered(table: &Table, column: &str, params: &[SqlValue]) -> Vec<Row> {
    table
        .matching("app_id", &params[0])
        .filter(|row| row.get(column).map(|v| *v == params[1]).unwrap_or(false))
        .cloned()
        .collect()
}

fn presence(table: &Table, key: &[SqlValue]) -> Vec<Row> {
    vec![Row::new().with("present", SqlValue::Bool(table.find(key).is_some()))]
}

fn affected(count: u64) -> Vec<Row> {
    vec![Row::new().with("affected", SqlValue::Int(count as i64))]
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn execute(&self, statement: Statement, params: Vec<SqlValue>) -> Result<u64, StoreError> {
        let rows = self.run(statement, params)?;
        Ok(rows
            .first()
            .and_then(|row| row.get_i64("affected").ok())
            .unwrap_or(1) as u64)
    }

    async fn fetch_one(&self, statement: Statement, params: Vec<SqlValue>) -> Result<Row, StoreError> {
        self.run(statement, params)?
            .into_iter()
            .next()
            .ok_or(StoreError::NoRows)
    }

    async fn fetch_all(&self, statement: Statement, params: Vec<SqlValue>) -> Result<Vec<Row>, StoreError> {
        self.run(statement, params)
    }
}

pub fn user_repository(database: &Arc<MemoryDatabase>) -> SqlUserRepository {
    SqlUserRepository::new(database.clone(), Arc::new(UserSerializer))
}

pub fn message_repository(database: &Arc<MemoryDatabase>) -> SqlMessageRepository {
    SqlMessageRepository::new(database.clone(), Arc::new(MessageSerializer))
}

pub fn organization_repository(database: &Arc<MemoryDatabase>) -> SqlOrganizationRepository {
    SqlOrganizationRepository::new(database.clone(), Arc::new(OrganizationSerializer))
}

pub fn inbox_repository(database: &Arc<MemoryDatabase>) -> SqlInboxRepository {
    SqlInboxRepository::new(database.clone(), Arc::new(InboxSerializer))
}

/// Generate a user with every field set
pub fn fake_user() -> User {
    User {
        user_id: Uuid::new_v4().to_string(),
        first_name: Some(FirstName().fake()),
        middle_name: None,
        last_name: Some(LastName().fake()),
        email: Some(format!("{}.{}", Uuid::new_v4().simple(), SafeEmail().fake::<String>())),
        github_profile: Some(format!("gh-{}", &Uuid::new_v4().to_string()[..8])),
        profile_image_id: Some(Uuid::new_v4().to_string()),
        roles: vec![Role::Developer, Role::Ops],
        birth_date: Some(DateTimeBefore(Utc::now() - Duration::days(365 * 18)).fake()),
        time_joined: None,
    }
}

/// Generate a message for the given application
pub fn fake_message(application_id: &str) -> Message {
    Message {
        message_id: Uuid::new_v4().to_string(),
        application_id: application_id.to_string(),
        title: Some(Sentence(2..5).fake()),
        body: Some(Sentence(5..12).fake()),
        urgency: Urgency::Medium,
        hostname: Some("build-agent-3".into()),
        mac_address: None,
        device_name: None,
        time_of_creation: Some(Utc::now()),
        time_message_received: None,
        application_name: Some("ci".into()),
    }
}

/// Generate an organization with a single owner
pub fn fake_organization() -> Organization {
    let name: String = CompanyName().fake();
    let mut organization = Organization::new(Uuid::new_v4().to_string(), name);
    organization.owners = vec![Uuid::new_v4().to_string()];
    organization.tier = Tier::Paid;
    organization
}

