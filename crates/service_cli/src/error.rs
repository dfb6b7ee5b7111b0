//! CLI error types

use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `pathwise` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Serialisation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

impl From<AnalyticalError> for CliError {
    fn from(err: AnalyticalError) -> Self {
        CliError::Pricing(err.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytical_error_becomes_pricing_error() {
        let err: CliError = AnalyticalError::InvalidSpot { spot: -1.0 }.into();
        match err {
            CliError::Pricing(PricingError::InvalidParameter { name, .. }) => {
                assert_eq!(name, "spot")
            }
            other => panic!("Expected Pricing error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_prefixes() {
        let err = CliError::InvalidArgument("--steps must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: --steps must be positive");

        let err: CliError = PricingError::invalid("strike", 0.0, "must be finite and positive").into();
        assert!(err.to_string().starts_with("Pricing error: Invalid parameter 'strike'"));
    }
}
