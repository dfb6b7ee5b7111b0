//! # Pricer Engine (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing drives the stochastic side of the workspace:
//! - Seedable, owned random number generation ([`rng::PricerRng`])
//! - GBM price path simulation in two equivalent constructions ([`mc`])
//! - Scenario orchestration: pick an evaluation point on a path, buy a
//!   Black-Scholes-Merton call there, and settle it at the path end
//!   ([`scenario`])
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `PricingError`, input validation, `TimeGrid`
//! - Layer 2 (pricer_models): `GbmDynamics`, `OptionContract`, `PricingQuote`
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::SimulationParameters;
//! use pricer_pricing::scenario::{simulate_and_run, ScenarioConfig};
//!
//! let params = SimulationParameters::builder()
//!     .initial_price(100.0)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let (path, outcome) = simulate_and_run(&params, &ScenarioConfig::default()).unwrap();
//! assert_eq!(path.len(), 253);
//! assert!(outcome.purchase.fair_value >= 0.0);
//! ```
//!
//! ## Concurrency
//!
//! Every simulation owns its generator; nothing in this crate holds global
//! or shared mutable state. Batch pricing along a path runs on the rayon
//! thread pool and preserves time order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;
pub mod scenario;
