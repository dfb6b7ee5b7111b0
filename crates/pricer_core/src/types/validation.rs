//! Fail-fast validation of real-valued inputs.
//!
//! Each helper returns the value unchanged on success so checks compose
//! inline with `?`:
//!
//! ```
//! use pricer_core::types::validation::{require_finite, require_positive};
//!
//! # fn main() -> Result<(), pricer_core::types::PricingError> {
//! let spot = require_positive("spot", 100.0)?;
//! let rate = require_finite("rate", 0.05)?;
//! assert_eq!((spot, rate), (100.0, 0.05));
//! # Ok(())
//! # }
//! ```
//!
//! NaN fails every check, so no NaN can leak past validation.

use super::error::PricingError;

/// Requires `value` to be finite (not NaN, not infinite).
#[inline]
pub fn require_finite(name: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid(name, value, "must be finite"))
    }
}

/// Requires `value` to be finite and strictly positive.
#[inline]
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid(
            name,
            value,
            "must be finite and positive",
        ))
    }
}

/// Requires `value` to be finite and non-negative.
#[inline]
pub fn require_non_negative(name: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid(
            name,
            value,
            "must be finite and non-negative",
        ))
    }
}
