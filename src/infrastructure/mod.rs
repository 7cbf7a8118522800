//! Infrastructure Layer
//!
//! Store-facing implementations of the domain contracts:
//! - Database access (PostgreSQL pool, statements, rows)
//! - Serializers mapping entities to and from rows
//! - Repositories combining validation, serialization and store access

pub mod database;
pub mod repositories;
pub mod serializers;
