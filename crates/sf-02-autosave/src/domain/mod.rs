//! Domain layer for the autosave pump
//!
//! Pure bookkeeping with no timers or I/O, so the single-save-in-flight rule
//! can be checked without a runtime.

pub mod state;

pub use state::{PumpState, TickDecision, TickOutcome};
