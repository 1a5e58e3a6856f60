//! Domain module for the document lifecycle
//!
//! - document: the `Document` value and its guarded state machine
//! - expiry: deadline and grace-period evaluation
//! - summary: listing read model and status filters

pub mod document;
pub mod expiry;
pub mod summary;

pub use document::{Document, DocumentRecord, LifecycleState};
pub use expiry::{ExpiryOutcome, ExpiryPolicy};
pub use summary::{DocumentSummary, StatusFilter};
