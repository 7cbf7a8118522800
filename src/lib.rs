//! # Aroma Data
//!
//! Validation and persistence layer for the Aroma notification service:
//! - Reusable, composable assertions over domain objects
//! - Request validators for every entity that crosses the service boundary
//! - PostgreSQL repositories for users, messages and organizations
//!
//! ## Module Structure
//!
//! ```text
//! aroma_data/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, repository traits, validators
//! +-- infrastructure/ Database access, serializers, repositories
//! +-- shared/         Errors and the assertion engine
//! ```

pub mod config;

pub mod domain;

pub mod infrastructure;

pub mod shared;

pub mod telemetry;
