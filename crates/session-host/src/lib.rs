//! # Session Host
//!
//! Composes the document lifecycle tracker (SF-01), the draft autosave pump
//! (SF-02) and the form validator (SF-03) into one editing session.
//!
//! ## Architectural Patterns
//!
//! - **EDA (Event-Driven Architecture)**: components report through the event
//!   bus only; none of them holds a reference to another
//! - **Hexagonal Architecture**: components expose ports, the adapters here
//!   bind them to the bus, the draft store and the metrics registry
//! - **Configuration**: one `SessionConfig`, loadable from the environment

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod config;
pub mod error;
pub mod session;

pub use adapters::{BusAutosaveObserver, DraftRevision, InMemoryDraftStore};
pub use config::{ConfigError, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use session::{default_signing_form, EditingSession};
