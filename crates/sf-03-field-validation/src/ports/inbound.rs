//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::ValidationResult;

/// A pure `&str -> ValidationResult` check for one field.
///
/// Any `Fn(&str) -> ValidationResult` closure or function is a validator, so
/// callers rarely implement this by hand.
pub trait FieldValidator: Send + Sync {
    fn validate(&self, value: &str) -> ValidationResult;
}

impl<F> FieldValidator for F
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &str) -> ValidationResult {
        self(value)
    }
}
