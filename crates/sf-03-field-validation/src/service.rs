//! # Field Validation Service
//!
//! `ValidationEngine` runs one validator and holds the latest result for its
//! field. `FormValidator` keeps one engine per named field.
//!
//! The held result sits behind an `Arc` that is swapped under a write lock,
//! so a reader gets either the previous result or the new one, whole.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::ValidationResult;
use crate::domain::errors::{FieldResult, ValidationError};
use crate::ports::FieldValidator;

/// A validator plus the single most recent result it produced.
pub struct ValidationEngine {
    validator: Box<dyn FieldValidator>,
    current: RwLock<Option<Arc<ValidationResult>>>,
}

impl ValidationEngine {
    pub fn new(validator: impl FieldValidator + 'static) -> Self {
        Self::from_boxed(Box::new(validator))
    }

    pub fn from_boxed(validator: Box<dyn FieldValidator>) -> Self {
        Self {
            validator,
            current: RwLock::new(None),
        }
    }

    /// Run the validator and replace the held result with its output.
    pub fn validate(&self, value: &str) -> Arc<ValidationResult> {
        let result = Arc::new(self.validator.validate(value));
        *self.current.write() = Some(Arc::clone(&result));
        result
    }

    /// Latest result, if `validate` has run since creation or `reset`.
    pub fn current(&self) -> Option<Arc<ValidationResult>> {
        self.current.read().clone()
    }

    pub fn reset(&self) {
        *self.current.write() = None;
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}

/// Named fields of one form, each with its own engine.
#[derive(Debug, Default)]
pub struct FormValidator {
    fields: BTreeMap<String, ValidationEngine>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `register`. A repeated name replaces the earlier rule.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        validator: impl FieldValidator + 'static,
    ) -> Self {
        self.fields
            .insert(name.into(), ValidationEngine::new(validator));
        self
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        validator: impl FieldValidator + 'static,
    ) -> FieldResult<()> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(ValidationError::DuplicateField(name));
        }
        self.fields.insert(name, ValidationEngine::new(validator));
        Ok(())
    }

    pub fn validate_field(&self, field: &str, value: &str) -> FieldResult<Arc<ValidationResult>> {
        let engine = self.engine(field)?;
        let result = engine.validate(value);
        if result.valid {
            trace!(field, "Field valid");
        } else {
            debug!(field, message = ?result.message, "Field invalid");
        }
        Ok(result)
    }

    /// Latest result for `field`; `None` until it has been validated.
    pub fn result(&self, field: &str) -> FieldResult<Option<Arc<ValidationResult>>> {
        Ok(self.engine(field)?.current())
    }

    /// True when every registered field has been validated and passed.
    pub fn is_form_valid(&self) -> bool {
        self.fields
            .values()
            .all(|engine| engine.current().is_some_and(|r| r.valid))
    }

    /// Fields whose latest result is invalid, in name order.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, engine)| engine.current().is_some_and(|r| !r.valid))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn reset(&self) {
        for engine in self.fields.values() {
            engine.reset();
        }
    }

    fn engine(&self, field: &str) -> FieldResult<&ValidationEngine> {
        self.fields
            .get(field)
            .ok_or_else(|| ValidationError::UnknownField(field.to_string()))
    }
}
