//! # Validation Errors
//!
//! A failing field is an ordinary `ValidationResult`, not an error. These
//! cover misuse of the form registry.

use thiserror::Error;

pub type FieldResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No validator registered under this field name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A validator is already registered under this field name
    #[error("Field already registered: {0}")]
    DuplicateField(String),
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::UnknownField(_) => "unknown_field",
            ValidationError::DuplicateField(_) => "duplicate_field",
        }
    }
}
