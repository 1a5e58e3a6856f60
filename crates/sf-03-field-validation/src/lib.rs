//! # Field Validation (SF-03)
//!
//! Live validation for document form fields.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `ValidationResult` and the built-in rules
//! - **Ports Layer** (`ports/`): the `FieldValidator` seam; any
//!   `Fn(&str) -> ValidationResult` qualifies
//! - **Service Layer** (`service.rs`): `ValidationEngine` holds the latest
//!   result per field, `FormValidator` groups engines by field name
//!
//! ## Notes
//!
//! - An invalid field is an ordinary result, never an `Err`
//! - Each `validate` call fully replaces the held result; no retry, caching
//!   or debouncing happens here

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::ValidationResult;
pub use domain::errors::{FieldResult, ValidationError};
pub use domain::rules;
pub use ports::inbound::FieldValidator;
pub use service::{FormValidator, ValidationEngine};
