//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryResult;

/// How urgently a message should be delivered, stored as VARCHAR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Convert from database string representation.
    ///
    /// Unknown values map to `Low`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Low,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message sent by an application.
///
/// Maps to the `messages` table:
/// - message_id: UUID NOT NULL (composite PK with app_id)
/// - app_id: UUID NOT NULL
/// - title: TEXT NULL
/// - body: TEXT NULL
/// - urgency: VARCHAR(10) NOT NULL DEFAULT 'low'
/// - hostname, mac_address, device_name: TEXT NULL
/// - time_created: TIMESTAMPTZ NULL (reported by the sender)
/// - time_received: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - app_name: TEXT NULL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,

    pub application_id: String,

    pub title: Option<String>,

    pub body: Option<String>,

    #[serde(default)]
    pub urgency: Urgency,

    pub hostname: Option<String>,

    pub mac_address: Option<String>,

    pub device_name: Option<String>,

    pub time_of_creation: Option<DateTime<Utc>>,

    pub time_message_received: Option<DateTime<Utc>>,

    pub application_name: Option<String>,
}

impl Message {
    /// Whether the message was flagged as high urgency.
    pub fn is_urgent(&self) -> bool {
        self.urgency == Urgency::High
    }
}

/// Repository trait for Message data access operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert or update a message.
    async fn save_message(&self, message: &Message) -> RepositoryResult<()>;

    /// Get a message of an application. Fails with `DoesNotExist` when absent.
    async fn get_message(&self, application_id: &str, message_id: &str) -> RepositoryResult<Message>;

    /// Delete a message of an application.
    async fn delete_message(&self, application_id: &str, message_id: &str) -> RepositoryResult<()>;

    /// Check whether a message exists.
    async fn contains_message(&self, application_id: &str, message_id: &str) -> RepositoryResult<bool>;

    /// Messages sent by an application. Store errors yield an empty list.
    async fn get_messages_for_application(&self, application_id: &str) -> RepositoryResult<Vec<Message>>;

    /// Number of messages stored for an application.
    async fn get_count_by_application(&self, application_id: &str) -> RepositoryResult<i64>;

    /// Messages of an application sent from a host. Store errors yield an empty list.
    async fn get_messages_by_hostname(
        &self,
        application_id: &str,
        hostname: &str,
    ) -> RepositoryResult<Vec<Message>>;

    /// Messages of an application with exactly this title. Store errors yield an empty list.
    async fn get_messages_by_title(&self, application_id: &str, title: &str) -> RepositoryResult<Vec<Message>>;
}
