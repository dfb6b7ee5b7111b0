//! Scenario orchestration: buy a call on a simulated path, settle at its end.

use pricer_core::types::PricingError;
use pricer_models::analytical::{OptionContract, PricingQuote};
use rayon::prelude::*;
use tracing::debug;

use super::config::{EvaluationPoint, ScenarioConfig};
use crate::mc::{simulate, PricePath, SimulationParameters};
use crate::rng::PricerRng;

/// Result of one buy-then-settle scenario.
///
/// The call expires at the path horizon. `profit_loss` is the realised
/// intrinsic value at expiry minus the premium paid at purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioOutcome {
    /// Path index at which the call was bought
    pub evaluation_index: usize,
    /// Time offset of the purchase, in years
    pub evaluation_time: f64,
    /// The contract bought
    pub contract: OptionContract,
    /// Spot, remaining maturity, and fair value at purchase
    pub purchase: PricingQuote,
    /// Path price at the horizon
    pub terminal_spot: f64,
    /// `max(terminal_spot - strike, 0)`
    pub intrinsic_value: f64,
    /// `intrinsic_value - purchase.fair_value`
    pub profit_loss: f64,
}

/// Chooses the path index at which the call is bought.
///
/// - `Fixed(i)` requires `i <= step_count` and leaves `rng` untouched
/// - `Random` draws from `[warm_up_steps, step_count)` using `rng`, which
///   requires `warm_up_steps < step_count`
///
/// # Errors
/// `PricingError::InvalidParameter` naming `evaluation_index` or
/// `warm_up_steps`.
pub fn select_evaluation_index(
    path: &PricePath,
    config: &ScenarioConfig,
    rng: &mut PricerRng,
) -> Result<usize, PricingError> {
    let step_count = path.step_count();
    match config.evaluation {
        EvaluationPoint::Fixed(index) if index <= step_count => Ok(index),
        EvaluationPoint::Fixed(index) => Err(PricingError::invalid(
            "evaluation_index",
            index as f64,
            "must not exceed the path step count",
        )),
        EvaluationPoint::Random { .. } => rng
            .gen_index(config.warm_up_steps..step_count)
            .ok_or_else(|| {
                PricingError::invalid(
                    "warm_up_steps",
                    config.warm_up_steps as f64,
                    "must be less than the path step count",
                )
            }),
    }
}

/// Runs the scenario on `path`.
///
/// A random evaluation point is drawn with a generator seeded from
/// `EvaluationPoint::Random { seed }`, separate from the path's own seed.
///
/// # Errors
/// `PricingError::InvalidParameter` for an invalid configuration or an
/// evaluation point that does not fit the path, including zero pricing
/// volatility with time remaining.
pub fn run_scenario(path: &PricePath, config: &ScenarioConfig) -> Result<ScenarioOutcome, PricingError> {
    config.validate()?;
    let index = match config.evaluation {
        EvaluationPoint::Random { seed } => {
            select_evaluation_index(path, config, &mut PricerRng::from_optional_seed(seed))?
        }
        EvaluationPoint::Fixed(index) => index,
    };
    evaluate_at(path, config, index)
}

/// Runs the scenario with the call bought at `index`.
///
/// # Errors
/// `PricingError::InvalidParameter` if `index` is past the end of the path
/// or the configuration is invalid.
pub fn evaluate_at(
    path: &PricePath,
    config: &ScenarioConfig,
    index: usize,
) -> Result<ScenarioOutcome, PricingError> {
    config.validate()?;
    let point = path.get(index).ok_or_else(|| {
        PricingError::invalid(
            "evaluation_index",
            index as f64,
            "must not exceed the path step count",
        )
    })?;

    let contract = config.contract_for(point.price)?;
    let purchase = contract.quote(point.price, path.remaining(index))?;

    let terminal_spot = path.terminal().price;
    let intrinsic_value = contract.intrinsic_value(terminal_spot);
    let profit_loss = intrinsic_value - purchase.fair_value;

    debug!(
        evaluation_index = index,
        spot = point.price,
        strike = contract.strike(),
        time_to_maturity = purchase.time_to_maturity,
        premium = purchase.fair_value,
        terminal_spot,
        profit_loss,
        "scenario evaluated"
    );

    Ok(ScenarioOutcome {
        evaluation_index: index,
        evaluation_time: point.time,
        contract,
        purchase,
        terminal_spot,
        intrinsic_value,
        profit_loss,
    })
}

/// Re-prices `contract` at every point of `path`, expiring at the horizon.
///
/// Point `i` is priced with `T = horizon - t_i`. The quotes are computed in
/// parallel and returned in time order; the last one is the intrinsic value.
///
/// # Errors
/// `PricingError::InvalidParameter` if the contract cannot be priced with
/// time remaining (zero volatility).
///
/// # Examples
///
/// ```rust
/// use pricer_models::analytical::OptionContract;
/// use pricer_pricing::mc::{simulate, SimulationParameters};
/// use pricer_pricing::scenario::price_along_path;
///
/// let params = SimulationParameters::builder().step_count(50).seed(3).build().unwrap();
/// let path = simulate(&params).unwrap();
/// let contract = OptionContract::new(105.0, 0.03, 0.2).unwrap();
///
/// let quotes = price_along_path(&path, &contract).unwrap();
/// assert_eq!(quotes.len(), path.len());
/// assert_eq!(
///     quotes.last().unwrap().fair_value,
///     contract.intrinsic_value(path.terminal().price)
/// );
/// ```
pub fn price_along_path(
    path: &PricePath,
    contract: &OptionContract,
) -> Result<Vec<PricingQuote>, PricingError> {
    path.points()
        .par_iter()
        .enumerate()
        .map(|(index, point)| {
            contract
                .quote(point.price, path.remaining(index))
                .map_err(PricingError::from)
        })
        .collect()
}

/// Simulates a path from `params` and runs the scenario on it.
///
/// # Errors
/// Any error from [`simulate`] or [`run_scenario`].
pub fn simulate_and_run(
    params: &SimulationParameters,
    config: &ScenarioConfig,
) -> Result<(PricePath, ScenarioOutcome), PricingError> {
    let path = simulate(params)?;
    let outcome = run_scenario(&path, config)?;
    Ok((path, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::price_call;

    fn path(seed: u64) -> PricePath {
        let params = SimulationParameters::builder().seed(seed).build().unwrap();
        simulate(&params).unwrap()
    }

    fn fixed(index: usize) -> ScenarioConfig {
        ScenarioConfig {
            evaluation: EvaluationPoint::Fixed(index),
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn test_fixed_index_selected() {
        let path = path(1);
        let mut rng = PricerRng::from_seed(0);
        assert_eq!(select_evaluation_index(&path, &fixed(0), &mut rng).unwrap(), 0);
        assert_eq!(select_evaluation_index(&path, &fixed(252), &mut rng).unwrap(), 252);
    }

    #[test]
    fn test_fixed_index_past_end_rejected() {
        let path = path(1);
        let mut rng = PricerRng::from_seed(0);
        let err = select_evaluation_index(&path, &fixed(253), &mut rng).unwrap_err();
        assert_eq!(err.parameter_name(), Some("evaluation_index"));
    }

    #[test]
    fn test_random_index_respects_warm_up() {
        let path = path(1);
        let config = ScenarioConfig::default();
        for seed in 0..200 {
            let mut rng = PricerRng::from_seed(seed);
            let index = select_evaluation_index(&path, &config, &mut rng).unwrap();
            assert!((30..252).contains(&index), "index {} out of range", index);
        }
    }

    #[test]
    fn test_warm_up_too_long_rejected() {
        let params = SimulationParameters::builder()
            .step_count(30)
            .seed(1)
            .build()
            .unwrap();
        let path = simulate(&params).unwrap();
        let err = run_scenario(&path, &ScenarioConfig::default()).unwrap_err();
        assert_eq!(err.parameter_name(), Some("warm_up_steps"));
    }

    #[test]
    fn test_random_selection_reproducible() {
        let path = path(5);
        let config = ScenarioConfig::default();
        let a = run_scenario(&path, &config).unwrap();
        let b = run_scenario(&path, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_outcome_fields() {
        let path = path(9);
        let outcome = run_scenario(&path, &fixed(100)).unwrap();

        let spot = path[100].price;
        let strike = outcome.contract.strike();
        let ttm = path.remaining(100);
        assert_eq!(outcome.evaluation_index, 100);
        assert_eq!(outcome.evaluation_time, path[100].time);
        assert_relative_eq!(strike, spot * 1.05, epsilon = 1e-12);
        assert_eq!(outcome.purchase.spot, spot);
        assert_relative_eq!(ttm, 152.0 / 252.0, epsilon = 1e-12);
        assert_eq!(
            outcome.purchase.fair_value,
            price_call(spot, strike, ttm, 0.03, 0.2, 0.0).unwrap()
        );
        assert_eq!(outcome.terminal_spot, path.terminal().price);
        assert_eq!(outcome.intrinsic_value, (outcome.terminal_spot - strike).max(0.0));
        assert_eq!(
            outcome.profit_loss,
            outcome.intrinsic_value - outcome.purchase.fair_value
        );
    }

    #[test]
    fn test_purchase_at_expiry_breaks_even() {
        let path = path(2);
        let outcome = run_scenario(&path, &fixed(252)).unwrap();
        assert!(outcome.purchase.is_expired());
        assert_eq!(outcome.purchase.fair_value, outcome.intrinsic_value);
        assert_eq!(outcome.profit_loss, 0.0);
    }

    #[test]
    fn test_zero_pricing_volatility_rejected_with_time_remaining() {
        let path = path(2);
        let config = ScenarioConfig {
            volatility: 0.0,
            ..fixed(10)
        };
        let err = run_scenario(&path, &config).unwrap_err();
        assert_eq!(err.parameter_name(), Some("volatility"));
    }

    #[test]
    fn test_price_along_path_matches_sequential() {
        let path = path(11);
        let contract = OptionContract::new(105.0, 0.03, 0.2).unwrap();
        let quotes = price_along_path(&path, &contract).unwrap();

        assert_eq!(quotes.len(), path.len());
        for (index, quote) in quotes.iter().enumerate() {
            let expected = contract
                .quote(path[index].price, path.remaining(index))
                .unwrap();
            assert_eq!(*quote, expected);
        }
        let last = quotes.last().unwrap();
        assert!(last.is_expired());
        assert_eq!(last.fair_value, contract.intrinsic_value(path.terminal().price));
    }

    #[test]
    fn test_simulate_and_run() {
        let params = SimulationParameters::builder().seed(42).build().unwrap();
        let (path, outcome) = simulate_and_run(&params, &ScenarioConfig::default()).unwrap();
        assert_eq!(path, simulate(&params).unwrap());
        assert_eq!(outcome, run_scenario(&path, &ScenarioConfig::default()).unwrap());
    }
}
