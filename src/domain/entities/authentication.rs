//! Authentication token entity.
//!
//! Tokens are issued to users and applications; the owner is whoever the
//! token authenticates as.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Application,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    #[default]
    Active,
    Expired,
}

/// An authentication token and the identity it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationToken {
    pub token_id: Option<String>,

    /// ID of the user or application that owns the token
    pub owner_id: Option<String>,

    pub owner_name: Option<String>,

    pub organization_id: Option<String>,

    pub organization_name: Option<String>,

    pub token_type: Option<TokenType>,

    #[serde(default)]
    pub status: TokenStatus,

    pub time_of_creation: Option<DateTime<Utc>>,

    pub time_of_expiration: Option<DateTime<Utc>>,
}

impl AuthenticationToken {
    /// Whether the token is past its expiration time at `now`.
    ///
    /// A token without an expiration never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == TokenStatus::Expired
            || self.time_of_expiration.is_some_and(|expiration| expiration <= now)
    }
}
