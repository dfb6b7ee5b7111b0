//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to closed-form option valuation

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Raised eagerly by input validation, before any formula is evaluated.
/// An expired option (time to maturity <= 0) is not an error: it takes the
/// intrinsic-value branch.
///
/// # Variants
/// - `InvalidSpot`: Non-positive or non-finite spot price
/// - `InvalidStrike`: Non-positive or non-finite strike
/// - `InvalidExpiry`: Non-finite time to maturity
/// - `InvalidVolatility`: Negative or non-finite volatility, or zero volatility
///   while time to maturity is positive
/// - `InvalidRate`: Non-finite risk-free rate
/// - `InvalidDividendYield`: Negative or non-finite dividend yield
/// - `NumericalInstability`: Formula produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price (must be finite and positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (must be finite and positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to maturity (must be finite).
    #[error("Invalid time to maturity: T = {expiry}")]
    InvalidExpiry {
        /// The invalid time to maturity
        expiry: f64,
    },

    /// Invalid volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid risk-free rate (must be finite).
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid dividend yield (must be finite and non-negative).
    #[error("Invalid dividend yield: q = {dividend_yield}")]
    InvalidDividendYield {
        /// The invalid dividend yield value
        dividend_yield: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidSpot { spot } => {
                PricingError::invalid("spot", spot, "must be finite and positive")
            }
            AnalyticalError::InvalidStrike { strike } => {
                PricingError::invalid("strike", strike, "must be finite and positive")
            }
            AnalyticalError::InvalidExpiry { expiry } => {
                PricingError::invalid("time_to_maturity", expiry, "must be finite")
            }
            AnalyticalError::InvalidVolatility { volatility } => PricingError::invalid(
                "volatility",
                volatility,
                "must be finite, non-negative, and positive while time remains",
            ),
            AnalyticalError::InvalidRate { rate } => {
                PricingError::invalid("rate", rate, "must be finite")
            }
            AnalyticalError::InvalidDividendYield { dividend_yield } => PricingError::invalid(
                "dividend_yield",
                dividend_yield,
                "must be finite and non-negative",
            ),
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_spot_display() {
        let err = AnalyticalError::InvalidSpot { spot: -100.0 };
        assert_eq!(format!("{}", err), "Invalid spot price: S = -100");
    }

    #[test]
    fn test_invalid_strike_display() {
        let err = AnalyticalError::InvalidStrike { strike: 0.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = 0");
    }

    #[test]
    fn test_invalid_rate_display() {
        let err = AnalyticalError::InvalidRate {
            rate: f64::INFINITY,
        };
        assert_eq!(format!("{}", err), "Invalid rate: r = inf");
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = AnalyticalError::NumericalInstability {
            message: "d1 is NaN".to_string(),
        };
        assert_eq!(format!("{}", err), "Numerical instability: d1 is NaN");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = AnalyticalError::InvalidVolatility { volatility: 0.0 };
        let _: &dyn std::error::Error = &err;
    }

    // ==========================================================
    // From<AnalyticalError> for PricingError tests
    // ==========================================================

    #[test]
    fn test_input_variants_map_to_invalid_parameter() {
        let cases = [
            (AnalyticalError::InvalidSpot { spot: -1.0 }, "spot"),
            (AnalyticalError::InvalidStrike { strike: 0.0 }, "strike"),
            (
                AnalyticalError::InvalidExpiry { expiry: f64::NAN },
                "time_to_maturity",
            ),
            (
                AnalyticalError::InvalidVolatility { volatility: 0.0 },
                "volatility",
            ),
            (AnalyticalError::InvalidRate { rate: f64::NAN }, "rate"),
            (
                AnalyticalError::InvalidDividendYield {
                    dividend_yield: -0.01,
                },
                "dividend_yield",
            ),
        ];

        for (err, expected_name) in cases {
            let pricing_err: PricingError = err.into();
            match pricing_err {
                PricingError::InvalidParameter { name, .. } => assert_eq!(name, expected_name),
                other => panic!("Expected InvalidParameter, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_numerical_instability_to_pricing_error() {
        let err = AnalyticalError::NumericalInstability {
            message: "Overflow".to_string(),
        };
        let pricing_err: PricingError = err.into();
        match pricing_err {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("Overflow")),
            other => panic!("Expected NumericalInstability, got {:?}", other),
        }
    }
}
