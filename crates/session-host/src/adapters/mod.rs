//! # Adapters
//!
//! Port implementations connecting the components to the bus, the metrics
//! registry and draft storage.

pub mod autosave;
pub mod draft_store;
pub mod lifecycle;

pub use autosave::BusAutosaveObserver;
pub use draft_store::{DraftRevision, InMemoryDraftStore};
pub use lifecycle::{record_transition, to_session_event};
