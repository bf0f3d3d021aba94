//! Validation system
//!
//! Reusable closure validators plus the declarative listing schema applied
//! at the service boundary before every write.

pub mod schema;
pub mod validators;

pub use schema::{Operation, validate, validate_create, validate_update};
