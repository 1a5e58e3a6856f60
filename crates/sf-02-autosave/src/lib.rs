//! # sf-02-autosave
//!
//! Periodic persistence of an evolving value (the editor's draft buffer).
//!
//! ## Purpose
//!
//! - **Coalescing**: `update` overwrites a latest-value register; only the
//!   value present at a tick boundary is ever persisted
//! - **No overlap**: at most one save is in flight; a boundary that finds one
//!   running is skipped, not queued
//! - **Failure isolation**: save failures go to an `AutosaveObserver` and the
//!   schedule keeps running; `update` never sees them
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Service                                            │
//! │  - AutosavePump: ticker task + one save task        │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Outbound)                                   │
//! │  - SnapshotStore<T>, AutosaveObserver               │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Pure Logic)                                │
//! │  - PumpState: register, in-flight flag, versions    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let pump = AutosavePump::new(AutosaveConfig::default(), store, observer)?;
//! pump.start()?;
//!
//! pump.update(buffer.clone()); // on every keystroke
//!
//! let status = pump.status(); // saving / last_saved_at for the header
//! pump.stop();
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use config::{AutosaveConfig, DEFAULT_INTERVAL_MS};
pub use domain::{PumpState, TickDecision, TickOutcome};
pub use error::{AutosaveError, AutosaveResult, SaveError};
pub use metrics::{AutosaveMetrics, AutosaveMetricsSnapshot};
pub use ports::{AutosaveObserver, NoOpObserver, SnapshotStore};
pub use service::{AutosavePump, AutosaveStatus};
