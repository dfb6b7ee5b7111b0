//! GBM price path generation.
//!
//! This module turns [`SimulationParameters`] into a [`PricePath`] using the
//! log-space (exact) solution of the GBM SDE:
//! ```text
//! S(t+dt) = S(t) × exp((μ - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! # Schemes
//!
//! - [`PathScheme::LogReturnAccumulation`]: draw all `n` normals into one
//!   buffer, accumulate the log returns, and set `S_i = S_0 × exp(Σ_{k≤i} r_k)`
//! - [`PathScheme::IterativeMultiplicative`]: `S_{i+1} = S_i × exp(r_i)`, one
//!   draw per step
//!
//! Both read the generator in the same order. The product form `S_0 × exp(·)`
//! keeps a zero-increment path exactly at `S_0`.

use std::ops::Index;

use pricer_core::types::{PricingError, TimeGrid};
use pricer_models::models::{GbmDynamics, LogIncrement};
use tracing::debug;

use super::config::{PathScheme, SimulationParameters};
use crate::rng::PricerRng;

/// One sample of a price path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    /// Time offset from the path start, in years (>= 0)
    pub time: f64,
    /// Asset price (> 0)
    pub price: f64,
}

/// An immutable simulated price path.
///
/// Holds `step_count + 1` evenly spaced points. The first point is exactly
/// `(0, initial_price)` and the last time offset is exactly the horizon.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{simulate, SimulationParameters};
///
/// let params = SimulationParameters::builder().step_count(10).seed(1).build().unwrap();
/// let path = simulate(&params).unwrap();
///
/// assert_eq!(path.len(), 11);
/// assert_eq!(path.initial().price, 100.0);
/// assert_eq!(path.terminal().time, 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricePath {
    grid: TimeGrid,
    points: Vec<PathPoint>,
}

impl PricePath {
    /// Number of points (`step_count + 1`).
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Number of steps.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.grid.step_count()
    }

    /// Step size in years.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.grid.step_size()
    }

    /// Horizon in years.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.grid.horizon()
    }

    /// The time grid the path is sampled on.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// All points in time order.
    #[inline]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Point at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    /// First point `(0, initial_price)`.
    #[inline]
    pub fn initial(&self) -> &PathPoint {
        &self.points[0]
    }

    /// Last point `(horizon, S_T)`.
    #[inline]
    pub fn terminal(&self) -> &PathPoint {
        &self.points[self.points.len() - 1]
    }

    /// Years remaining from point `index` to the horizon (0 at the end).
    #[inline]
    pub fn remaining(&self, index: usize) -> f64 {
        self.grid.remaining(index)
    }

    /// Iterates over the points in time order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PathPoint> {
        self.points.iter()
    }

    /// Iterates over the time offsets.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time)
    }

    /// Iterates over the prices.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Per-step log returns `ln(S_{i+1} / S_i)`.
    pub fn log_returns(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| (w[1].price / w[0].price).ln())
            .collect()
    }
}

impl Index<usize> for PricePath {
    type Output = PathPoint;

    #[inline]
    fn index(&self, index: usize) -> &PathPoint {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PricePath {
    type Item = &'a PathPoint;
    type IntoIter = std::slice::Iter<'a, PathPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// GBM path simulator bound to one validated parameter set.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{PathSimulator, SimulationParameters};
/// use pricer_pricing::rng::PricerRng;
///
/// let simulator = PathSimulator::new(SimulationParameters::default()).unwrap();
///
/// let mut rng = PricerRng::from_seed(42);
/// let first = simulator.simulate_with_rng(&mut rng).unwrap();
/// let second = simulator.simulate_with_rng(&mut PricerRng::from_seed(42)).unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Clone, Debug)]
pub struct PathSimulator {
    params: SimulationParameters,
    grid: TimeGrid,
    dynamics: GbmDynamics,
    increment: LogIncrement,
}

impl PathSimulator {
    /// Validates `params` and precomputes the grid and step moments.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the offending field.
    pub fn new(params: SimulationParameters) -> Result<Self, PricingError> {
        params.validate()?;
        let grid = params.time_grid()?;
        let dynamics = params.dynamics()?;
        let increment = dynamics.log_increment_moments(grid.step_size());
        Ok(Self {
            params,
            grid,
            dynamics,
            increment,
        })
    }

    /// Returns the parameters.
    #[inline]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Simulates a path with a generator built from the parameters' seed.
    ///
    /// A `Some` seed gives a bit-identical path on every call; `None` draws
    /// from operating-system entropy.
    ///
    /// # Errors
    /// `PricingError::NumericalInstability` if a price leaves `(0, ∞)`.
    pub fn simulate(&self) -> Result<PricePath, PricingError> {
        let mut rng = PricerRng::from_optional_seed(self.params.seed());
        self.simulate_with_rng(&mut rng)
    }

    /// Simulates a path consuming `step_count` normal draws from `rng`.
    ///
    /// # Errors
    /// `PricingError::NumericalInstability` if a price leaves `(0, ∞)`.
    pub fn simulate_with_rng(&self, rng: &mut PricerRng) -> Result<PricePath, PricingError> {
        let step_count = self.grid.step_count();
        let initial_price = self.params.initial_price();

        debug!(
            step_count,
            scheme = %self.params.scheme(),
            seed = ?rng.seed(),
            "simulating GBM path"
        );

        let mut points = Vec::with_capacity(step_count + 1);
        points.push(PathPoint {
            time: 0.0,
            price: initial_price,
        });

        match self.params.scheme() {
            PathScheme::LogReturnAccumulation => {
                let mut shocks = vec![0.0; step_count];
                rng.fill_normal(&mut shocks);

                let mut cumulative = 0.0;
                for (step, &z) in shocks.iter().enumerate() {
                    cumulative += self.increment.apply(z);
                    let mut price = initial_price * cumulative.exp();
                    if !(price.is_finite() && price > 0.0) {
                        // exp(cumulative) alone left the f64 range
                        price = (initial_price.ln() + cumulative).exp();
                    }
                    points.push(self.point(step + 1, price)?);
                }
            }
            PathScheme::IterativeMultiplicative => {
                let dt = self.grid.step_size();
                let mut price = initial_price;
                for step in 0..step_count {
                    price = self.dynamics.evolve_step(price, dt, rng.gen_normal());
                    points.push(self.point(step + 1, price)?);
                }
            }
        }

        Ok(PricePath {
            grid: self.grid,
            points,
        })
    }

    #[inline]
    fn point(&self, index: usize, price: f64) -> Result<PathPoint, PricingError> {
        if price.is_finite() && price > 0.0 {
            Ok(PathPoint {
                time: self.grid.time_at(index),
                price,
            })
        } else {
            Err(PricingError::NumericalInstability(format!(
                "simulated price {} at step {} is outside (0, inf)",
                price, index
            )))
        }
    }
}

/// Simulates one GBM path from `params`.
///
/// Shorthand for `PathSimulator::new(params.clone())?.simulate()`.
///
/// # Errors
/// `PricingError::InvalidParameter` for invalid parameters,
/// `PricingError::NumericalInstability` if a price leaves `(0, ∞)`.
pub fn simulate(params: &SimulationParameters) -> Result<PricePath, PricingError> {
    PathSimulator::new(params.clone())?.simulate()
}
