//! Core error, validation, and time types.
//!
//! This module provides:
//! - `error`: Structured error type for pricing and simulation operations
//! - `validation`: Fail-fast checks for real-valued inputs
//! - `time`: Evenly spaced time grids for discretised paths
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`PricingError`] from `error`
//! - [`TimeGrid`] from `time`

pub mod error;
pub mod time;
pub mod validation;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use time::TimeGrid;
