//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes-Merton model for lognormal dynamics with dividend yield
//! - Analytical call Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Option contracts and per-evaluation pricing quotes
//!
//! ## Design Principles
//!
//! - **Intrinsic branch first**: expired queries never reach `d1`/`d2`
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{
    call_intrinsic, price_call, put_intrinsic, BlackScholes, Greeks, OptionContract,
    PricingQuote,
};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
