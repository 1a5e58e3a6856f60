//! # Session Errors
//!
//! Every component error a session operation can return, in one type.

use sf_01_document_lifecycle::LifecycleError;
use sf_02_autosave::AutosaveError;
use sf_03_field_validation::ValidationError;
use shared_types::ComponentId;
use thiserror::Error;

use crate::config::ConfigError;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Autosave(#[from] AutosaveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Component the error came from, for logs and error metrics.
    pub fn component(&self) -> ComponentId {
        match self {
            SessionError::Lifecycle(_) => ComponentId::DocumentLifecycle,
            SessionError::Autosave(_) => ComponentId::Autosave,
            SessionError::Validation(_) => ComponentId::FieldValidation,
            SessionError::Config(_) => ComponentId::SessionHost,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Lifecycle(e) => e.kind(),
            SessionError::Autosave(e) => e.kind(),
            SessionError::Validation(e) => e.kind(),
            SessionError::Config(_) => "config",
        }
    }
}
