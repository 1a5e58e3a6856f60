//! # Shared Types Crate
//!
//! Entity types shared by every SignFlow component.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-component types are defined here so the
//!   lifecycle tracker, the event bus and the session host agree on them.
//! - **No Behaviour**: Only identity, status and time types live here; state
//!   machines belong to their component crates.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
