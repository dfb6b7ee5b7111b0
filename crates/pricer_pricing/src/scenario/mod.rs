//! Call-option scenarios on simulated paths.
//!
//! A scenario picks an evaluation point on a [`PricePath`](crate::mc::PricePath),
//! buys a European call there at its Black-Scholes-Merton fair value, and
//! settles it against the path's terminal price:
//!
//! ```text
//! PricePath ──select_evaluation_index──▶ (index, spot)
//!           ──ScenarioConfig::contract_for──▶ OptionContract (strike = spot × (1 + markup))
//!           ──OptionContract::quote(spot, horizon - t_index)──▶ purchase PricingQuote
//!           ──terminal price──▶ intrinsic value, profit/loss
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{simulate, SimulationParameters};
//! use pricer_pricing::scenario::{run_scenario, ScenarioConfig};
//!
//! let params = SimulationParameters::builder().seed(7).build().unwrap();
//! let path = simulate(&params).unwrap();
//!
//! let outcome = run_scenario(&path, &ScenarioConfig::default()).unwrap();
//! assert!(outcome.evaluation_index >= 30);
//! assert_eq!(
//!     outcome.profit_loss,
//!     outcome.intrinsic_value - outcome.purchase.fair_value
//! );
//! ```

mod config;
mod orchestrator;

pub use config::{EvaluationPoint, ScenarioConfig, DEFAULT_STRIKE_MARKUP, DEFAULT_WARM_UP_STEPS};
pub use orchestrator::{
    evaluate_at, price_along_path, run_scenario, select_evaluation_index, simulate_and_run,
    ScenarioOutcome,
};
