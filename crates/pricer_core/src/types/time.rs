//! Evenly spaced time grids for discretised price paths.
//!
//! A [`TimeGrid`] splits a horizon (in years) into `step_count` equal steps
//! and exposes the `step_count + 1` grid points `0, dt, 2dt, ..., horizon`.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::TimeGrid;
//!
//! let grid = TimeGrid::new(2.0, 4).unwrap();
//! assert_eq!(grid.step_size(), 0.5);
//! assert_eq!(grid.time_at(3), 1.5);
//! assert_eq!(grid.remaining(3), 0.5);
//! ```

use super::error::PricingError;
use super::validation::require_positive;

/// Evenly spaced simulation time grid.
///
/// Grid index `0` is time zero and index `step_count` is the horizon
/// itself, returned exactly rather than as an accumulated multiple of `dt`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeGrid {
    horizon: f64,
    step_count: usize,
}

impl TimeGrid {
    /// Creates a grid over `[0, horizon]` with `step_count` equal steps.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `horizon` is not finite and positive
    /// or `step_count` is zero.
    pub fn new(horizon: f64, step_count: usize) -> Result<Self, PricingError> {
        require_positive("horizon", horizon)?;
        if step_count == 0 {
            return Err(PricingError::invalid(
                "step_count",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(Self {
            horizon,
            step_count,
        })
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

    /// Returns the number of grid points (`step_count + 1`).
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.step_count + 1
    }

    /// Returns the step size `dt = horizon / step_count`.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.horizon / self.step_count as f64
    }

    /// Returns the time offset of grid point `index`.
    ///
    /// Indices past the last point are clamped to the horizon.
    #[inline]
    pub fn time_at(&self, index: usize) -> f64 {
        if index >= self.step_count {
            self.horizon
        } else {
            index as f64 * self.step_size()
        }
    }

    /// Returns the time remaining from grid point `index` to the horizon.
    ///
    /// Exactly zero at (and past) the last grid point.
    #[inline]
    pub fn remaining(&self, index: usize) -> f64 {
        let steps_left = self.step_count.saturating_sub(index);
        steps_left as f64 * self.step_size()
    }

    /// Iterates over all `step_count + 1` time offsets in order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.time_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_valid() {
        let grid = TimeGrid::new(1.0, 252).unwrap();
        assert_eq!(grid.horizon(), 1.0);
        assert_eq!(grid.step_count(), 252);
        assert_eq!(grid.len(), 253);
        assert_relative_eq!(grid.step_size(), 1.0 / 252.0, epsilon = 1e-15);
    }

    #[test]
    fn test_new_rejects_zero_steps() {
        let err = TimeGrid::new(1.0, 0).unwrap_err();
        assert_eq!(err.parameter_name(), Some("step_count"));
    }

    #[test]
    fn test_new_rejects_bad_horizon() {
        assert!(TimeGrid::new(0.0, 10).is_err());
        assert!(TimeGrid::new(-1.0, 10).is_err());
        assert!(TimeGrid::new(f64::NAN, 10).is_err());
        assert!(TimeGrid::new(f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_endpoints_exact() {
        let grid = TimeGrid::new(0.7, 3).unwrap();
        assert_eq!(grid.time_at(0), 0.0);
        assert_eq!(grid.time_at(3), 0.7);
        assert_eq!(grid.remaining(3), 0.0);
        assert_eq!(grid.time_at(10), 0.7);
        assert_eq!(grid.remaining(10), 0.0);
    }

    #[test]
    fn test_times_evenly_spaced() {
        let grid = TimeGrid::new(5.0, 1260).unwrap();
        let times: Vec<f64> = grid.times().collect();
        assert_eq!(times.len(), 1261);
        for window in times.windows(2) {
            assert_relative_eq!(window[1] - window[0], grid.step_size(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_remaining_complements_elapsed() {
        let grid = TimeGrid::new(1.0, 252).unwrap();
        for i in [0, 30, 126, 251] {
            assert_relative_eq!(grid.time_at(i) + grid.remaining(i), 1.0, epsilon = 1e-12);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_remaining_non_negative_and_decreasing(
                horizon in 0.01f64..10.0,
                step_count in 1usize..2000,
            ) {
                let grid = TimeGrid::new(horizon, step_count).unwrap();
                let mut previous = f64::INFINITY;
                for i in 0..grid.len() {
                    let r = grid.remaining(i);
                    prop_assert!(r >= 0.0);
                    prop_assert!(r < previous);
                    previous = r;
                }
            }
        }
    }
}
