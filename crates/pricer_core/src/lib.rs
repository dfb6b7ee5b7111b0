//! # pricer_core: Foundation Layer for Pathwise
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError` (`types::error`)
//! - Eager input validation helpers (`types::validation`)
//! - Evenly spaced simulation time grids: `TimeGrid` (`types::time`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derive
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{validation, PricingError, TimeGrid};
//!
//! let grid = TimeGrid::new(1.0, 252).unwrap();
//! assert_eq!(grid.len(), 253);
//! assert_eq!(grid.time_at(252), 1.0);
//!
//! let err = validation::require_positive("spot", -1.0).unwrap_err();
//! assert!(matches!(err, PricingError::InvalidParameter { name: "spot", .. }));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `TimeGrid`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
