//! Geometric Brownian Motion (GBM) dynamics.
//!
//! GBM is the fundamental model for asset price dynamics, described by:
//! ```text
//! dS = mu * S * dt + sigma * S * dW
//! ```
//! where:
//! - S = asset price
//! - mu = drift (annualised)
//! - sigma = volatility (annualised)
//! - dW = Wiener process increment
//!
//! ## Log-space formulation
//!
//! Prices are advanced with the exact solution over one step:
//! ```text
//! S(t+dt) = S(t) * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z),  Z ~ N(0, 1)
//! ```
//! so a positive starting price stays positive for any draw.

use pricer_core::types::validation::{require_finite, require_non_negative};
use pricer_core::types::PricingError;

/// Mean and standard deviation of a single-step log return.
///
/// For a step of length `dt` the log return `ln(S(t+dt)/S(t))` is normal
/// with `mean = (mu - 0.5*sigma^2)*dt` and `std_dev = sigma*sqrt(dt)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogIncrement {
    /// Deterministic part of the step log return
    pub mean: f64,
    /// Scale applied to the standard normal draw
    pub std_dev: f64,
}

impl LogIncrement {
    /// Log return for the standard normal draw `z`: `mean + std_dev * z`.
    #[inline]
    pub fn apply(&self, z: f64) -> f64 {
        self.mean + self.std_dev * z
    }
}

/// Geometric Brownian Motion with constant drift and volatility.
///
/// # Examples
/// ```
/// use pricer_models::models::GbmDynamics;
///
/// let gbm = GbmDynamics::new(0.05, 0.2).unwrap();
///
/// // A zero draw moves the price by the drift correction alone
/// let next = gbm.evolve_step(100.0, 1.0, 0.0);
/// assert!((next - 100.0 * (0.05_f64 - 0.02).exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmDynamics {
    drift: f64,
    volatility: f64,
}

impl GbmDynamics {
    /// Creates GBM dynamics.
    ///
    /// # Arguments
    /// * `drift` - Annualised drift (any finite value)
    /// * `volatility` - Annualised volatility (finite, non-negative)
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the offending parameter.
    pub fn new(drift: f64, volatility: f64) -> Result<Self, PricingError> {
        Ok(Self {
            drift: require_finite("drift", drift)?,
            volatility: require_non_negative("volatility", volatility)?,
        })
    }

    /// Returns the drift.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Moments of the log return over a step of length `dt`.
    #[inline]
    pub fn log_increment_moments(&self, dt: f64) -> LogIncrement {
        LogIncrement {
            mean: (self.drift - 0.5 * self.volatility * self.volatility) * dt,
            std_dev: self.volatility * dt.sqrt(),
        }
    }

    /// Log return over a step of length `dt` for the standard normal draw `z`.
    #[inline]
    pub fn log_increment(&self, dt: f64, z: f64) -> f64 {
        self.log_increment_moments(dt).apply(z)
    }

    /// Advances `price` by one step of length `dt` using the draw `z`.
    #[inline]
    pub fn evolve_step(&self, price: f64, dt: f64, z: f64) -> f64 {
        price * self.log_increment(dt, z).exp()
    }

    /// Expected log return `E[ln(S_t / S_0)]` over horizon `t`.
    #[inline]
    pub fn expected_log_return(&self, t: f64) -> f64 {
        self.log_increment_moments(t).mean
    }

    /// Variance of the log return `Var[ln(S_t / S_0)] = sigma^2 * t`.
    #[inline]
    pub fn log_return_variance(&self, t: f64) -> f64 {
        self.volatility * self.volatility * t
    }
}
