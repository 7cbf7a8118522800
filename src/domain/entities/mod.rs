//! # Domain Entities
//!
//! Core domain entities. Entities are plain value objects; identifiers are
//! carried as strings and only accepted by repositories once they parse as
//! UUIDs.
//!
//! ## Persisted Entities
//!
//! - **User**: a person using the service
//! - **Message**: a message sent by an application
//! - **Organization**: a group of users and applications, with its members
//! - **InboxMessage**: a message delivered to one user
//!
//! ## Request Entities
//!
//! - **Application**: a program registered to send messages
//! - **AuthenticationToken**: a credential and its owner
//! - **AndroidDevice / IosDevice / MobileDevice**: push notification targets
//! - **Reaction**: a user-defined rule applied to incoming messages
//!
//! ## Repository Traits
//!
//! Each persisted entity has an associated repository trait defining data
//! access operations. These traits are implemented in the infrastructure
//! layer.

mod application;
mod authentication;
mod device;
mod inbox;
mod message;
mod organization;
mod reaction;
mod user;

pub use application::{Application, ProgrammingLanguage, Tier};
pub use authentication::{AuthenticationToken, TokenStatus, TokenType};
pub use device::{AndroidDevice, IosDevice, MobileDevice};
pub use inbox::{InboxMessage, InboxRepository};
pub use message::{Message, MessageRepository, Urgency};
pub use organization::{Organization, OrganizationRepository};
pub use reaction::{Action, Matcher, Reaction};
pub use user::{Role, User, UserRepository};
