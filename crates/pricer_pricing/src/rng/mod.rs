//! # Random Number Generation Infrastructure
//!
//! This module provides the random number generator used by path simulation
//! and by the scenario orchestrator's evaluation-point draw.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: A seeded generator yields an identical sequence on
//!   every run; the seed is retained for logging
//! - **Ownership**: Each simulation owns its generator and receives it
//!   explicitly; there is no process-wide generator
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Seeded generator for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//!
//! // Entropy-seeded generator: not reproducible
//! let fresh = PricerRng::from_entropy();
//! assert_eq!(fresh.seed(), None);
//! ```

mod prng;

pub use prng::PricerRng;
