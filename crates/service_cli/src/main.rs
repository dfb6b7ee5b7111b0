//! pathwise CLI - GBM path simulation and call-option scenarios
//!
//! # Commands
//!
//! - `pathwise simulate` - Simulate one GBM price path
//! - `pathwise price --spot <S> --strike <K> --maturity <T>` - Black-Scholes-Merton price
//! - `pathwise scenario` - Buy a call on a simulated path and settle it at the horizon
//!
//! Settings are layered: flags, then `PATHWISE_*` environment variables,
//! then `pathwise.toml`, then defaults. Reports go to stdout and logs to
//! stderr (`RUST_LOG` overrides the configured level).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::price::PriceArgs;
use commands::scenario::ScenarioArgs;
use commands::simulate::SimulationArgs;
use config::{build_config, CliArgs, LogLevel, OutputFormat};

/// GBM path simulation and call-option scenarios
#[derive(Parser)]
#[command(name = "pathwise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: ./pathwise.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one GBM price path
    Simulate(SimulationArgs),

    /// Price a European option in closed form
    Price(PriceArgs),

    /// Buy a call on a simulated path and settle it at the horizon
    Scenario(ScenarioArgs),
}

fn init_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&CliArgs {
        config_file: cli.config,
        format: cli.format,
        verbose: cli.verbose,
    })?;

    init_tracing(config.log_level);
    debug!(?config, "Configuration loaded");

    match &cli.command {
        Commands::Simulate(args) => commands::simulate::run(args, &config),
        Commands::Price(args) => commands::price::run(args, &config),
        Commands::Scenario(args) => commands::scenario::run(args, &config),
    }
}
