//! # Ports Layer
//!
//! - `inbound`: the validator seam callers plug their field rules into

pub mod inbound;

pub use inbound::FieldValidator;
