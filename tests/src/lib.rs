//! # SignFlow Test Suite
//!
//! Unified test crate for behaviour that spans more than one component.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks per component
//! └── src/integration/  # Cross-component flows
//!     ├── lifecycle_flows.rs
//!     ├── autosave_flows.rs
//!     └── session_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sf-tests
//!
//! # By flow
//! cargo test -p sf-tests integration::autosave_flows
//!
//! # Benchmarks
//! cargo bench -p sf-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
