//! # Domain Layer
//!
//! Validation results and the built-in field rules. No state, no I/O.

pub mod entities;
pub mod errors;
pub mod rules;

pub use entities::ValidationResult;
pub use errors::{FieldResult, ValidationError};
