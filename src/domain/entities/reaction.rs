//! Reaction entity.
//!
//! A reaction is a user-defined rule: when an incoming message satisfies all
//! of the matchers, the actions are run.

use serde::{Deserialize, Serialize};

use super::message::{Message, Urgency};

/// A condition on an incoming message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    All,
    ApplicationIs(String),
    HostnameIs(String),
    TitleContains(String),
    BodyContains(String),
    UrgencyIs(Urgency),
}

impl Matcher {
    /// Whether the message satisfies this condition.
    pub fn matches(&self, message: &Message) -> bool {
        fn contains(field: &Option<String>, needle: &str) -> bool {
            field.as_deref().is_some_and(|value| value.contains(needle))
        }

        match self {
            Self::All => true,
            Self::ApplicationIs(id) => &message.application_id == id,
            Self::HostnameIs(host) => message.hostname.as_deref() == Some(host.as_str()),
            Self::TitleContains(needle) => contains(&message.title, needle),
            Self::BodyContains(needle) => contains(&message.body, needle),
            Self::UrgencyIs(urgency) => message.urgency == *urgency,
        }
    }
}

/// What to do with a matching message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SkipInbox,
    DontStoreMessage,
    ForwardToUsers(Vec<String>),
    SendEmail(String),
    RespondWithMessage(String),
}

/// A named rule of matchers and actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub name: Option<String>,

    #[serde(default)]
    pub matchers: Vec<Matcher>,

    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Reaction {
    /// A reaction applies when every matcher matches. A reaction without
    /// matchers applies to nothing.
    pub fn applies_to(&self, message: &Message) -> bool {
        !self.matchers.is_empty() && self.matchers.iter().all(|matcher| matcher.matches(message))
    }
}
