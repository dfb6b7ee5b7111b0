//! Scenario configuration.

use pricer_core::types::validation::{require_finite, require_non_negative, require_positive};
use pricer_core::types::PricingError;
use pricer_models::analytical::OptionContract;

/// Default number of leading steps excluded from the random evaluation draw.
pub const DEFAULT_WARM_UP_STEPS: usize = 30;

/// Default strike markup over the evaluation spot (strike = spot × 1.05).
pub const DEFAULT_STRIKE_MARKUP: f64 = 0.05;

/// Where on the path the call is bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EvaluationPoint {
    /// A fixed path index in `[0, step_count]`.
    Fixed(usize),
    /// An index drawn uniformly from `[warm_up_steps, step_count)` with its
    /// own generator, independent of the path's seed.
    Random {
        /// Seed for the index draw; `None` draws from entropy.
        seed: Option<u64>,
    },
}

impl Default for EvaluationPoint {
    fn default() -> Self {
        EvaluationPoint::Random { seed: Some(0) }
    }
}

/// Parameters of a buy-then-settle call scenario.
///
/// The pricing inputs (`rate`, `volatility`, `dividend_yield`) are those of
/// the option model and need not match the dynamics used to simulate the
/// path.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::scenario::{EvaluationPoint, ScenarioConfig};
///
/// let config = ScenarioConfig {
///     evaluation: EvaluationPoint::Fixed(100),
///     ..ScenarioConfig::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let contract = config.contract_for(100.0).unwrap();
/// assert!((contract.strike() - 105.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    /// Leading steps excluded from a random evaluation draw
    pub warm_up_steps: usize,
    /// Relative strike markup over the evaluation spot (must exceed -1)
    pub strike_markup: f64,
    /// Absolute strike; overrides `strike_markup` when set
    pub strike: Option<f64>,
    /// Risk-free rate used for pricing
    pub rate: f64,
    /// Volatility used for pricing
    pub volatility: f64,
    /// Continuous dividend yield used for pricing
    pub dividend_yield: f64,
    /// Evaluation point selection
    pub evaluation: EvaluationPoint,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            warm_up_steps: DEFAULT_WARM_UP_STEPS,
            strike_markup: DEFAULT_STRIKE_MARKUP,
            strike: None,
            rate: 0.03,
            volatility: 0.2,
            dividend_yield: 0.0,
            evaluation: EvaluationPoint::default(),
        }
    }
}

impl ScenarioConfig {
    /// Validates the path-independent fields.
    ///
    /// Whether `warm_up_steps` and a fixed index fit the path is checked
    /// when the index is selected.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        let markup = require_finite("strike_markup", self.strike_markup)?;
        if markup <= -1.0 {
            return Err(PricingError::invalid(
                "strike_markup",
                markup,
                "must be greater than -1",
            ));
        }
        if let Some(strike) = self.strike {
            require_positive("strike", strike)?;
        }
        require_finite("rate", self.rate)?;
        require_non_negative("volatility", self.volatility)?;
        require_non_negative("dividend_yield", self.dividend_yield)?;
        Ok(())
    }

    /// Strike for a call bought at `spot`.
    #[inline]
    pub fn strike_for(&self, spot: f64) -> f64 {
        self.strike
            .unwrap_or_else(|| spot * (1.0 + self.strike_markup))
    }

    /// The call contract bought at `spot`.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if the strike, rate, volatility, or
    /// dividend yield is invalid.
    pub fn contract_for(&self, spot: f64) -> Result<OptionContract, PricingError> {
        let contract = OptionContract::new(self.strike_for(spot), self.rate, self.volatility)?
            .with_dividend_yield(self.dividend_yield)?;
        Ok(contract)
    }
}
