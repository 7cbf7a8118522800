//! Application entity.
//!
//! An application is a program registered to send messages. It belongs to an
//! organization and is administered by one or more owners.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service tier an application or organization is provisioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Paid,
}

impl Tier {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgrammingLanguage {
    Java,
    Cpp,
    CSharp,
    C,
    Objective,
    Swift,
    Python,
    Go,
    Ruby,
    Php,
    Rust,
    Javascript,
    Other,
}

/// A registered application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub application_id: String,

    pub name: Option<String>,

    pub application_description: Option<String>,

    pub organization_id: Option<String>,

    /// User IDs of the application's owners
    #[serde(default)]
    pub owners: BTreeSet<String>,

    pub programming_language: Option<ProgrammingLanguage>,

    #[serde(default)]
    pub tier: Tier,

    pub time_of_provisioning: Option<DateTime<Utc>>,

    pub application_icon_media_id: Option<String>,
}

impl Application {
    /// Whether the given user is one of the owners.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owners.contains(user_id)
    }
}
