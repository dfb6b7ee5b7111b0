//! GBM path simulation.
//!
//! # Architecture
//!
//! ```text
//! PathSimulator
//! ├── SimulationParameters  (validated inputs, PathScheme, optional seed)
//! ├── TimeGrid              (evenly spaced offsets, exact horizon)
//! ├── LogIncrement          (per-step log-return moments from GbmDynamics)
//! └── PricerRng             (owned, passed explicitly)
//!         ↓
//!     PricePath             (immutable, step_count + 1 points)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{simulate, SimulationParameters};
//!
//! let params = SimulationParameters::builder()
//!     .initial_price(100.0)
//!     .drift(0.0)
//!     .volatility(0.0)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! // Zero drift and zero volatility: every point stays at the initial price
//! let path = simulate(&params).unwrap();
//! assert!(path.prices().all(|p| p == 100.0));
//! ```

mod config;
mod paths;

pub use config::{PathScheme, SimulationParameters, SimulationParametersBuilder, MAX_STEPS};
pub use paths::{simulate, PathPoint, PathSimulator, PricePath};
