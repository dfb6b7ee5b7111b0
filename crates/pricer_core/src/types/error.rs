//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from path simulation and option pricing

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every core operation is deterministic: it either succeeds or fails
/// on invalid input. There is no transient failure class, so callers
/// never retry on any of these variants.
///
/// # Variants
/// - `InvalidParameter`: An input violated its domain (non-positive price,
///   zero step count, non-finite value, zero volatility with time left)
/// - `NumericalInstability`: A computation produced a non-finite result
///   despite validated inputs
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter {
///     name: "strike",
///     value: -5.0,
///     reason: "must be positive",
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'strike' = -5: must be positive"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// An input value is outside its valid domain.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as seen by the caller
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Constraint the value failed to satisfy
        reason: &'static str,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Shorthand for building an `InvalidParameter` error.
    #[inline]
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Returns the offending parameter name for `InvalidParameter` errors.
    pub fn parameter_name(&self) -> Option<&'static str> {
        match self {
            PricingError::InvalidParameter { name, .. } => Some(*name),
            PricingError::NumericalInstability(_) => None,
        }
    }
}
