//! Simulate command implementation
//!
//! Generates one GBM price path and prints every point.

use std::io::Write;

use clap::Args;
use pricer_pricing::mc::{PathScheme, PathSimulator, PricePath, SimulationParameters};
use tracing::info;

use super::output::{write_rows, PathRow};
use crate::config::{CliConfig, ConfigError, OutputFormat};
use crate::Result;

/// Path simulation flags; unset flags fall back to `[simulation]`
#[derive(Debug, Clone, Default, Args)]
pub struct SimulationArgs {
    /// Initial price S0
    #[arg(long)]
    pub initial_price: Option<f64>,

    /// Annualised drift (mu)
    #[arg(long)]
    pub drift: Option<f64>,

    /// Annualised volatility of the simulated path (sigma)
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Path horizon in years
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Number of time steps
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// RNG seed; omit for a fresh entropy-seeded path
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path construction scheme (log-return, iterative)
    #[arg(long)]
    pub scheme: Option<PathScheme>,
}

impl SimulationArgs {
    /// Simulation parameters with these flags layered over `config`
    pub fn parameters(&self, config: &CliConfig) -> std::result::Result<SimulationParameters, ConfigError> {
        let mut section = config.simulation.clone();
        if let Some(initial_price) = self.initial_price {
            section.initial_price = initial_price;
        }
        if let Some(drift) = self.drift {
            section.drift = drift;
        }
        if let Some(volatility) = self.volatility {
            section.volatility = volatility;
        }
        if let Some(horizon) = self.horizon {
            section.horizon = horizon;
        }
        if let Some(steps) = self.steps {
            section.steps = steps;
        }
        if self.seed.is_some() {
            section.seed = self.seed;
        }
        if let Some(scheme) = self.scheme {
            section.scheme = scheme;
        }
        section.to_parameters()
    }
}

/// Simulates the path described by `params`.
pub fn simulate_path(params: SimulationParameters) -> Result<PricePath> {
    info!(
        initial_price = params.initial_price(),
        drift = params.drift(),
        volatility = params.volatility(),
        horizon = params.horizon(),
        steps = params.step_count(),
        seed = ?params.seed(),
        scheme = %params.scheme(),
        "Simulating path"
    );
    let path = PathSimulator::new(params)?.simulate()?;
    info!(terminal_price = path.terminal().price, "Simulation complete");
    Ok(path)
}

/// Writes the path report for `args` to `out`.
pub fn execute<W: Write>(
    args: &SimulationArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let path = simulate_path(args.parameters(config)?)?;
    write_rows(format, &PathRow::from_path(&path), out)
}

/// Run the simulate command
pub fn run(args: &SimulationArgs, config: &CliConfig) -> Result<()> {
    execute(args, config, config.format, &mut std::io::stdout().lock())
}
