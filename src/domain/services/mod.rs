//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to
//! a single entity.
//!
//! ## Services
//!
//! - **request_assertions**: reusable assertions for entities and identifiers
//!   arriving in requests

pub mod request_assertions;
