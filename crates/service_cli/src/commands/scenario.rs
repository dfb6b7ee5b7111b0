//! Scenario command implementation
//!
//! Simulates a path, buys a call at the evaluation point and settles it at
//! the horizon. With `--along-path` the call is also re-priced at every point.

use std::io::Write;

use clap::Args;
use pricer_pricing::mc::PricePath;
use pricer_pricing::scenario::{price_along_path, run_scenario, EvaluationPoint, ScenarioConfig};
use serde::Serialize;
use tracing::info;

use super::output::{write_csv, write_json, write_rows, write_table, QuoteRow, ScenarioRow};
use super::simulate::{simulate_path, SimulationArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Scenario flags; unset flags fall back to `[pricing]` and `[scenario]`
#[derive(Debug, Clone, Default, Args)]
pub struct ScenarioArgs {
    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Risk-free rate used to price the call
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Volatility used to price the call
    #[arg(long)]
    pub option_volatility: Option<f64>,

    /// Continuous dividend yield used to price the call
    #[arg(short = 'q', long)]
    pub dividend_yield: Option<f64>,

    /// Strike markup over the evaluation spot
    #[arg(long, conflicts_with = "strike")]
    pub markup: Option<f64>,

    /// Absolute strike, overriding the markup
    #[arg(short = 'k', long)]
    pub strike: Option<f64>,

    /// Leading steps excluded from the random evaluation draw
    #[arg(long)]
    pub warm_up: Option<usize>,

    /// Buy the call at this path index instead of drawing one
    #[arg(long, conflicts_with = "evaluation_seed")]
    pub evaluation_index: Option<usize>,

    /// Seed for the evaluation index draw
    #[arg(long)]
    pub evaluation_seed: Option<u64>,

    /// Also re-price the call at every point of the path
    #[arg(long)]
    pub along_path: bool,
}

impl ScenarioArgs {
    /// Scenario configuration with these flags layered over `config`
    pub fn scenario_config(&self, config: &CliConfig) -> ScenarioConfig {
        let mut scenario = config.scenario_config();
        if let Some(rate) = self.rate {
            scenario.rate = rate;
        }
        if let Some(volatility) = self.option_volatility {
            scenario.volatility = volatility;
        }
        if let Some(dividend_yield) = self.dividend_yield {
            scenario.dividend_yield = dividend_yield;
        }
        if let Some(markup) = self.markup {
            scenario.strike_markup = markup;
            scenario.strike = None;
        }
        if self.strike.is_some() {
            scenario.strike = self.strike;
        }
        if let Some(warm_up) = self.warm_up {
            scenario.warm_up_steps = warm_up;
        }
        if let Some(index) = self.evaluation_index {
            scenario.evaluation = EvaluationPoint::Fixed(index);
        } else if self.evaluation_seed.is_some() {
            scenario.evaluation = EvaluationPoint::Random {
                seed: self.evaluation_seed,
            };
        }
        scenario
    }
}

/// Outcome plus the optional re-pricing series
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub outcome: ScenarioRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub along_path: Option<Vec<QuoteRow>>,
}

/// Runs the scenario on `path`.
pub fn evaluate(path: &PricePath, scenario: &ScenarioConfig, along_path: bool) -> Result<ScenarioReport> {
    let outcome = run_scenario(path, scenario)?;
    info!(
        evaluation_index = outcome.evaluation_index,
        strike = outcome.contract.strike(),
        premium = outcome.purchase.fair_value,
        profit_loss = outcome.profit_loss,
        "Scenario complete"
    );

    let along_path = if along_path {
        let quotes = price_along_path(path, &outcome.contract)?;
        Some(QuoteRow::from_quotes(path, &quotes))
    } else {
        None
    };

    Ok(ScenarioReport {
        outcome: ScenarioRow::from(&outcome),
        along_path,
    })
}

/// Writes `report` in the requested format.
///
/// CSV carries a single table: the re-pricing series when present, the
/// outcome otherwise.
pub fn write_report<W: Write>(report: &ScenarioReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match (format, &report.along_path) {
        (_, None) => write_rows(format, &[report.outcome], out),
        (OutputFormat::Json, Some(_)) => write_json(report, out),
        (OutputFormat::Csv, Some(series)) => write_csv(series, out),
        (OutputFormat::Table, Some(series)) => {
            write_table(&[report.outcome], out)?;
            write_table(series, out)
        }
    }
}

/// Writes the scenario report for `args` to `out`.
pub fn execute<W: Write>(
    args: &ScenarioArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let params = args.simulation.parameters(config)?;
    let scenario = args.scenario_config(config);
    scenario
        .validate()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    let path = simulate_path(params)?;
    let report = evaluate(&path, &scenario, args.along_path)?;
    write_report(&report, format, out)
}

/// Run the scenario command
pub fn run(args: &ScenarioArgs, config: &CliConfig) -> Result<()> {
    execute(args, config, config.format, &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded() -> ScenarioArgs {
        ScenarioArgs {
            simulation: SimulationArgs {
                seed: Some(7),
                ..SimulationArgs::default()
            },
            ..ScenarioArgs::default()
        }
    }

    fn report(args: &ScenarioArgs) -> ScenarioReport {
        let config = CliConfig::default();
        let path = simulate_path(args.simulation.parameters(&config).unwrap()).unwrap();
        evaluate(&path, &args.scenario_config(&config), args.along_path).unwrap()
    }

    #[test]
    fn test_defaults_follow_config() {
        let scenario = seeded().scenario_config(&CliConfig::default());
        assert_eq!(scenario, ScenarioConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = ScenarioArgs {
            rate: Some(0.01),
            option_volatility: Some(0.3),
            strike: Some(110.0),
            warm_up: Some(10),
            evaluation_index: Some(50),
            ..seeded()
        };
        let scenario = args.scenario_config(&CliConfig::default());
        assert_eq!(scenario.rate, 0.01);
        assert_eq!(scenario.volatility, 0.3);
        assert_eq!(scenario.strike, Some(110.0));
        assert_eq!(scenario.warm_up_steps, 10);
        assert_eq!(scenario.evaluation, EvaluationPoint::Fixed(50));
    }

    #[test]
    fn test_markup_clears_configured_strike() {
        let mut config = CliConfig::default();
        config.scenario.strike = Some(120.0);
        let args = ScenarioArgs {
            markup: Some(0.1),
            ..seeded()
        };
        let scenario = args.scenario_config(&config);
        assert_eq!(scenario.strike, None);
        assert_relative_eq!(scenario.strike_for(100.0), 110.0, epsilon = 1e-12);
    }

    #[test]
    fn test_outcome_identity() {
        let report = report(&seeded());
        let row = report.outcome;
        assert!(row.evaluation_index >= 30 && row.evaluation_index < 252);
        assert_relative_eq!(row.strike, row.spot * 1.05, epsilon = 1e-12);
        assert_eq!(row.profit_loss, row.intrinsic_value - row.premium);
        assert!(report.along_path.is_none());
    }

    #[test]
    fn test_along_path_series() {
        let args = ScenarioArgs {
            along_path: true,
            ..seeded()
        };
        let report = report(&args);
        let series = report.along_path.as_ref().unwrap();
        assert_eq!(series.len(), 253);

        let at_purchase = &series[report.outcome.evaluation_index];
        assert_eq!(at_purchase.fair_value, report.outcome.premium);
        let last = series.last().unwrap();
        assert_eq!(last.time_to_maturity, 0.0);
        assert_eq!(last.fair_value, report.outcome.intrinsic_value);
    }

    #[test]
    fn test_json_report_shape() {
        let args = ScenarioArgs {
            along_path: true,
            ..seeded()
        };
        let mut out = Vec::new();
        execute(&args, &CliConfig::default(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["outcome"]["profit_loss"].is_number());
        assert_eq!(value["along_path"].as_array().unwrap().len(), 253);
    }

    #[test]
    fn test_csv_without_series_is_outcome_row() {
        let mut out = Vec::new();
        execute(&seeded(), &CliConfig::default(), OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("evaluation_index,evaluation_time,spot,strike"));
    }

    #[test]
    fn test_invalid_pricing_flag_rejected_before_simulation() {
        let args = ScenarioArgs {
            dividend_yield: Some(-0.1),
            ..seeded()
        };
        let mut out = Vec::new();
        let err = execute(&args, &CliConfig::default(), OutputFormat::Table, &mut out).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_warm_up_past_path_end() {
        let args = ScenarioArgs {
            simulation: SimulationArgs {
                steps: Some(20),
                seed: Some(1),
                ..SimulationArgs::default()
            },
            ..ScenarioArgs::default()
        };
        let mut out = Vec::new();
        let err = execute(&args, &CliConfig::default(), OutputFormat::Table, &mut out).unwrap_err();
        match err {
            CliError::Pricing(e) => assert_eq!(e.parameter_name(), Some("warm_up_steps")),
            other => panic!("Expected pricing error, got {:?}", other),
        }
    }
}
