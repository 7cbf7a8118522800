//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **LengthOfTime**: a (unit, value) duration supplied by clients
//! - **Image**: raw image bytes for icons and profile pictures

mod image;
mod length_of_time;

pub use image::*;
pub use length_of_time::*;
