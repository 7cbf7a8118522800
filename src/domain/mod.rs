//! # Domain Layer
//!
//! The domain layer contains the entities, value objects and validation rules
//! of the service. It is independent of the store.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Message, Organization, etc.)
//!   and their repository traits
//! - **value_objects**: Immutable value types (LengthOfTime, Image)
//! - **services**: Request assertions shared by every repository
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure
//! - Repository traits define data access contracts
//! - Malformed input is rejected here, before any store interaction

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
