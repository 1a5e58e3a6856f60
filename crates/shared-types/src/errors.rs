//! # Error Types
//!
//! Defines error types shared across components.

use thiserror::Error;

/// Errors raised when parsing shared entity types from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Status string is not one of `draft | pending | completed | expired`.
    #[error("Unknown document status: {0}")]
    UnknownStatus(String),

    /// Identifier is not a valid UUID.
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(String),
}
