//! Stochastic process models.
//!
//! This module provides the asset dynamics used by path simulation:
//! - `GbmDynamics`: Geometric Brownian Motion in log-space form
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::GbmDynamics;
//!
//! let gbm = GbmDynamics::new(0.1, 0.2).unwrap();
//! let moments = gbm.log_increment_moments(1.0 / 252.0);
//! assert!(moments.std_dev > 0.0);
//! ```

pub mod gbm;

pub use gbm::{GbmDynamics, LogIncrement};
