//! # sf-01-document-lifecycle
//!
//! Signature-completion accounting for e-signed documents.
//!
//! ## Overview
//!
//! - **Derived status**: `draft | pending | completed | expired` is computed from
//!   one state value that also carries the signature counts
//! - **Guarded mutation**: sends, signatures and expiry checks that would break
//!   the accounting are rejected with a `LifecycleError`, never clamped
//! - **Terminal states**: `completed` and `expired` accept no further mutation
//!
//! ## State Machine
//!
//! ```text
//! [DRAFT] ──send(n)──→ [PENDING k/n] ──sign (k+1 == n)──→ [COMPLETED]
//!                          │   ↺ sign (k+1 < n)
//!                          └──deadline passed──→ [EXPIRED]
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sf_01_document_lifecycle::DocumentLifecycleTracker;
//!
//! let mut tracker = DocumentLifecycleTracker::draft("Employment contract");
//! tracker.record_send(2)?;
//! tracker.record_signature()?;
//! tracker.record_signature()?; // -> Completed
//!
//! for event in tracker.take_events() {
//!     // publish to the session bus
//! }
//! ```

pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use domain::{
    Document, DocumentRecord, DocumentSummary, ExpiryOutcome, ExpiryPolicy, LifecycleState,
    StatusFilter,
};
pub use error::{LifecycleError, LifecycleResult};
pub use events::LifecycleEvent;
pub use ports::{Clock, ManualClock, SystemClock};
pub use service::{DocumentLifecycleTracker, LifecycleConfig};
pub use shared_types::DocumentStatus;
