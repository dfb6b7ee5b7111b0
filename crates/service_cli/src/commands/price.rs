//! Price command implementation
//!
//! Prices a single European option with the Black-Scholes-Merton formula.

use std::io::Write;

use clap::Args;
use pricer_models::analytical::BlackScholes;
use tracing::info;

use super::output::{write_rows, PriceRow};
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Closed-form pricing flags; market inputs fall back to `[pricing]`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Spot price
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Time to maturity in years
    #[arg(short = 't', long)]
    pub maturity: f64,

    /// Continuously compounded risk-free rate
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Annualised volatility
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Continuous dividend yield
    #[arg(short = 'q', long)]
    pub dividend_yield: Option<f64>,

    /// Price a put instead of a call
    #[arg(long)]
    pub put: bool,

    /// Include call Greeks
    #[arg(long, conflicts_with = "put")]
    pub greeks: bool,
}

/// Prices the option described by `args`.
pub fn price(args: &PriceArgs, config: &CliConfig) -> Result<PriceRow> {
    if args.put && args.greeks {
        return Err(CliError::InvalidArgument(
            "--greeks is only available for calls".to_string(),
        ));
    }

    let rate = args.rate.unwrap_or(config.pricing.rate);
    let volatility = args.volatility.unwrap_or(config.pricing.volatility);
    let dividend_yield = args.dividend_yield.unwrap_or(config.pricing.dividend_yield);
    let model = BlackScholes::new(rate, volatility)?.with_dividend_yield(dividend_yield)?;

    let (option, price) = if args.put {
        ("put", model.price_put(args.spot, args.strike, args.maturity)?)
    } else {
        ("call", model.price_call(args.spot, args.strike, args.maturity)?)
    };
    let greeks = if args.greeks {
        Some(model.call_greeks(args.spot, args.strike, args.maturity)?)
    } else {
        None
    };

    info!(option, spot = args.spot, strike = args.strike, maturity = args.maturity, price, "Priced option");

    Ok(PriceRow {
        option,
        spot: args.spot,
        strike: args.strike,
        maturity: args.maturity,
        rate,
        volatility,
        dividend_yield,
        price,
        delta: greeks.map(|g| g.delta),
        gamma: greeks.map(|g| g.gamma),
        vega: greeks.map(|g| g.vega),
        theta: greeks.map(|g| g.theta),
        rho: greeks.map(|g| g.rho),
    })
}

/// Writes the price report for `args` to `out`.
pub fn execute<W: Write>(
    args: &PriceArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let row = price(args, config)?;
    write_rows(format, &[row], out)
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    execute(args, config, config.format, &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::PricingError;

    fn atm() -> PriceArgs {
        PriceArgs {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: Some(0.05),
            volatility: Some(0.2),
            dividend_yield: None,
            put: false,
            greeks: false,
        }
    }

    #[test]
    fn test_call_reference_value() {
        let row = price(&atm(), &CliConfig::default()).unwrap();
        assert_eq!(row.option, "call");
        assert_relative_eq!(row.price, 10.450583572185565, epsilon = 1e-10);
        assert_eq!(row.delta, None);
    }

    #[test]
    fn test_put_reference_value() {
        let args = PriceArgs { put: true, ..atm() };
        let row = price(&args, &CliConfig::default()).unwrap();
        assert_eq!(row.option, "put");
        assert_relative_eq!(row.price, 5.573526022256971, epsilon = 1e-10);
    }

    #[test]
    fn test_config_supplies_market_inputs() {
        let args = PriceArgs {
            strike: 105.0,
            rate: None,
            volatility: None,
            ..atm()
        };
        let row = price(&args, &CliConfig::default()).unwrap();
        assert_eq!(row.rate, 0.03);
        assert_eq!(row.volatility, 0.2);
        assert_relative_eq!(row.price, 7.1280646692617395, epsilon = 1e-10);
    }

    #[test]
    fn test_unused_simulation_section_ignored() {
        let mut config = CliConfig::default();
        config.simulation.steps = 0;
        config.simulation.horizon = -1.0;
        let row = price(&atm(), &config).unwrap();
        assert_relative_eq!(row.price, 10.450583572185565, epsilon = 1e-10);
    }

    #[test]
    fn test_greeks_included() {
        let args = PriceArgs { greeks: true, ..atm() };
        let row = price(&args, &CliConfig::default()).unwrap();
        let delta = row.delta.unwrap();
        assert!(delta > 0.5 && delta < 1.0);
        assert!(row.gamma.unwrap() > 0.0);
        assert!(row.vega.unwrap() > 0.0);
    }

    #[test]
    fn test_put_greeks_rejected() {
        let args = PriceArgs {
            put: true,
            greeks: true,
            ..atm()
        };
        let err = price(&args, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_spot_reported() {
        let args = PriceArgs { spot: -1.0, ..atm() };
        let err = price(&args, &CliConfig::default()).unwrap_err();
        match err {
            CliError::Pricing(e @ PricingError::InvalidParameter { .. }) => {
                assert_eq!(e.parameter_name(), Some("spot"))
            }
            other => panic!("Expected invalid spot, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_prices_intrinsic() {
        let args = PriceArgs {
            spot: 110.0,
            maturity: 0.0,
            ..atm()
        };
        let row = price(&args, &CliConfig::default()).unwrap();
        assert_eq!(row.price, 10.0);
    }
}
