//! Error types for the document lifecycle
//!
//! Every variant is a caller contract violation: it is returned synchronously
//! from the mutating operation and leaves the document untouched.

use shared_types::DocumentStatus;
use thiserror::Error;

/// Document lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Operation is not permitted from the document's current status
    #[error("Invalid transition: cannot {operation} a document that is {from}")]
    InvalidTransition {
        operation: &'static str,
        from: DocumentStatus,
    },

    /// A signature was recorded beyond the declared total
    #[error("Over-completion: all {total} signatures already recorded")]
    OverCompletion { total: u32 },

    /// Documents must be sent to at least one recipient
    #[error("Invalid signature total: a document needs at least one signature")]
    InvalidSignatureTotal,

    /// A stored record violates the status/count invariant
    #[error("Corrupt document record: {reason}")]
    CorruptRecord { reason: String },
}

impl LifecycleError {
    /// Short machine-readable kind for metrics labels.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleError::InvalidTransition { .. } => "invalid_transition",
            LifecycleError::OverCompletion { .. } => "over_completion",
            LifecycleError::InvalidSignatureTotal => "invalid_signature_total",
            LifecycleError::CorruptRecord { .. } => "corrupt_record",
        }
    }
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
