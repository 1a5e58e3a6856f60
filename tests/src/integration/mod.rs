//! Cross-component flows.

pub mod autosave_flows;
pub mod lifecycle_flows;
pub mod session_flows;
