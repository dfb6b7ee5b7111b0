//! Path simulation configuration.
//!
//! This module provides [`SimulationParameters`], the immutable description
//! of one GBM path, its fluent [`SimulationParametersBuilder`], and the
//! [`PathScheme`] selector.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::validation::{require_finite, require_non_negative, require_positive};
use pricer_core::types::{PricingError, TimeGrid};
use pricer_models::models::GbmDynamics;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 1_000_000;

/// Construction used to turn normal draws into a price path.
///
/// Both schemes consume draws in the same order, so for the same seed they
/// agree up to floating-point rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathScheme {
    /// Cumulative sum of per-step log returns, exponentiated once per point.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "log-return"))]
    LogReturnAccumulation,

    /// Each price is the previous one times `exp(shock)`.
    #[cfg_attr(feature = "serde", serde(rename = "iterative"))]
    IterativeMultiplicative,
}

impl fmt::Display for PathScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathScheme::LogReturnAccumulation => write!(f, "log-return"),
            PathScheme::IterativeMultiplicative => write!(f, "iterative"),
        }
    }
}

impl FromStr for PathScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log-return" | "log_return" | "cumulative" => Ok(PathScheme::LogReturnAccumulation),
            "iterative" | "multiplicative" => Ok(PathScheme::IterativeMultiplicative),
            _ => Err(format!(
                "Invalid path scheme: {}. Valid values: log-return, iterative",
                s
            )),
        }
    }
}

/// GBM path simulation parameters.
///
/// Immutable once built. Use [`SimulationParameters::builder`] or
/// [`SimulationParameters::new`]; both validate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{PathScheme, SimulationParameters};
///
/// let params = SimulationParameters::builder()
///     .initial_price(100.0)
///     .drift(0.1)
///     .volatility(0.2)
///     .horizon(1.0)
///     .step_count(252)
///     .seed(42)
///     .scheme(PathScheme::IterativeMultiplicative)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.step_count(), 252);
/// assert_eq!(params.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    initial_price: f64,
    drift: f64,
    volatility: f64,
    horizon: f64,
    step_count: usize,
    seed: Option<u64>,
    scheme: PathScheme,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            drift: 0.1,
            volatility: 0.2,
            horizon: 1.0,
            step_count: 252,
            seed: None,
            scheme: PathScheme::LogReturnAccumulation,
        }
    }
}

impl SimulationParameters {
    /// Creates validated parameters with no seed and the default scheme.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the first offending field.
    pub fn new(
        initial_price: f64,
        drift: f64,
        volatility: f64,
        horizon: f64,
        step_count: usize,
    ) -> Result<Self, PricingError> {
        Self::builder()
            .initial_price(initial_price)
            .drift(drift)
            .volatility(volatility)
            .horizon(horizon)
            .step_count(step_count)
            .build()
    }

    /// Creates a builder starting from the default parameters.
    #[inline]
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Returns the starting price.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Returns the annualised drift.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the horizon in years.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Returns the number of steps.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the path construction scheme.
    #[inline]
    pub fn scheme(&self) -> PathScheme {
        self.scheme
    }

    /// Returns a copy with the given seed.
    #[inline]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns a copy with the given scheme.
    #[inline]
    pub fn with_scheme(mut self, scheme: PathScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Returns the time grid the path is sampled on.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for a bad horizon or zero steps.
    pub fn time_grid(&self) -> Result<TimeGrid, PricingError> {
        TimeGrid::new(self.horizon, self.step_count)
    }

    /// Returns the GBM dynamics for these parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for a non-finite drift or bad volatility.
    pub fn dynamics(&self) -> Result<GbmDynamics, PricingError> {
        GbmDynamics::new(self.drift, self.volatility)
    }

    /// Validates the parameters.
    ///
    /// Deserialised parameters bypass the builder, so simulation re-validates
    /// through this method.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if:
    /// - `initial_price` is not finite and positive
    /// - `drift` is not finite
    /// - `volatility` is negative or not finite
    /// - `horizon` is not finite and positive
    /// - `step_count` is 0 or greater than [`MAX_STEPS`]
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive("initial_price", self.initial_price)?;
        require_finite("drift", self.drift)?;
        require_non_negative("volatility", self.volatility)?;
        require_positive("horizon", self.horizon)?;
        if self.step_count == 0 || self.step_count > MAX_STEPS {
            return Err(PricingError::invalid(
                "step_count",
                self.step_count as f64,
                "must be between 1 and 1000000",
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationParameters`].
///
/// Starts from the default parameters (initial price 100, drift 0.1,
/// volatility 0.2, one-year horizon, 252 steps, no seed, log-return scheme)
/// and validates at [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct SimulationParametersBuilder {
    params: SimulationParameters,
}

impl SimulationParametersBuilder {
    /// Sets the starting price (finite, positive).
    #[inline]
    pub fn initial_price(mut self, initial_price: f64) -> Self {
        self.params.initial_price = initial_price;
        self
    }

    /// Sets the annualised drift (finite).
    #[inline]
    pub fn drift(mut self, drift: f64) -> Self {
        self.params.drift = drift;
        self
    }

    /// Sets the annualised volatility (finite, non-negative).
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.params.volatility = volatility;
        self
    }

    /// Sets the horizon in years (finite, positive).
    #[inline]
    pub fn horizon(mut self, horizon: f64) -> Self {
        self.params.horizon = horizon;
        self
    }

    /// Sets the number of steps in [1, 1_000_000].
    #[inline]
    pub fn step_count(mut self, step_count: usize) -> Self {
        self.params.step_count = step_count;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn optional_seed(mut self, seed: Option<u64>) -> Self {
        self.params.seed = seed;
        self
    }

    /// Sets the path construction scheme.
    #[inline]
    pub fn scheme(mut self, scheme: PathScheme) -> Self {
        self.params.scheme = scheme;
        self
    }

    /// Builds the parameters.
    ///
    /// # Errors
    /// See [`SimulationParameters::validate`].
    pub fn build(self) -> Result<SimulationParameters, PricingError> {
        self.params.validate()?;
        Ok(self.params)
    }
}
