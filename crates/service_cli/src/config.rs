//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables,
//! and command-line flags.
//!
//! Priority (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (`PATHWISE_*`)
//! 3. Config file (`pathwise.toml` by default)
//! 4. Default values

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_pricing::mc::{PathScheme, SimulationParameters};
use pricer_pricing::scenario::{EvaluationPoint, ScenarioConfig};
use serde::Deserialize;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pathwise.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[simulation]` table: GBM path inputs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub initial_price: f64,
    pub drift: f64,
    pub volatility: f64,
    pub horizon: f64,
    pub steps: usize,
    pub seed: Option<u64>,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub scheme: PathScheme,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let params = SimulationParameters::default();
        Self {
            initial_price: params.initial_price(),
            drift: params.drift(),
            volatility: params.volatility(),
            horizon: params.horizon(),
            steps: params.step_count(),
            seed: params.seed(),
            scheme: params.scheme(),
        }
    }
}

impl SimulationSection {
    /// Validated simulation parameters
    pub fn to_parameters(&self) -> Result<SimulationParameters, ConfigError> {
        SimulationParameters::builder()
            .initial_price(self.initial_price)
            .drift(self.drift)
            .volatility(self.volatility)
            .horizon(self.horizon)
            .step_count(self.steps)
            .optional_seed(self.seed)
            .scheme(self.scheme)
            .build()
            .map_err(|e| ConfigError::InvalidValue(format!("[simulation] {}", e)))
    }
}

/// `[pricing]` table: Black-Scholes-Merton market inputs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricingSection {
    pub rate: f64,
    pub volatility: f64,
    pub dividend_yield: f64,
}

impl Default for PricingSection {
    fn default() -> Self {
        let scenario = ScenarioConfig::default();
        Self {
            rate: scenario.rate,
            volatility: scenario.volatility,
            dividend_yield: scenario.dividend_yield,
        }
    }
}

/// `[scenario]` table: evaluation point and strike rule
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioSection {
    pub warm_up: usize,
    pub markup: f64,
    pub strike: Option<f64>,
    pub evaluation_index: Option<usize>,
    pub evaluation_seed: Option<u64>,
}

impl Default for ScenarioSection {
    fn default() -> Self {
        let scenario = ScenarioConfig::default();
        let evaluation_seed = match scenario.evaluation {
            EvaluationPoint::Random { seed } => seed,
            EvaluationPoint::Fixed(_) => None,
        };
        Self {
            warm_up: scenario.warm_up_steps,
            markup: scenario.strike_markup,
            strike: scenario.strike,
            evaluation_index: None,
            evaluation_seed,
        }
    }
}

/// Complete CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
    pub simulation: SimulationSection,
    pub pricing: PricingSection,
    pub scenario: ScenarioSection,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override with `PATHWISE_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override with variables resolved by `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PATHWISE_LOG_LEVEL") {
            self.log_level = level.parse()?;
        }
        if let Some(format) = lookup("PATHWISE_FORMAT") {
            self.format = format.parse()?;
        }
        if let Some(seed) = lookup("PATHWISE_SEED") {
            self.simulation.seed = Some(parse_env("PATHWISE_SEED", &seed)?);
        }
        if let Some(steps) = lookup("PATHWISE_STEPS") {
            self.simulation.steps = parse_env("PATHWISE_STEPS", &steps)?;
        }
        if let Some(scheme) = lookup("PATHWISE_SCHEME") {
            self.simulation.scheme = scheme
                .parse()
                .map_err(|e: String| ConfigError::EnvError(format!("PATHWISE_SCHEME: {}", e)))?;
        }
        if let Some(rate) = lookup("PATHWISE_RATE") {
            self.pricing.rate = parse_env("PATHWISE_RATE", &rate)?;
        }
        if let Some(dividend_yield) = lookup("PATHWISE_DIVIDEND_YIELD") {
            self.pricing.dividend_yield = parse_env("PATHWISE_DIVIDEND_YIELD", &dividend_yield)?;
        }
        Ok(())
    }

    /// Scenario configuration built from `[pricing]` and `[scenario]`
    pub fn scenario_config(&self) -> ScenarioConfig {
        let evaluation = match self.scenario.evaluation_index {
            Some(index) => EvaluationPoint::Fixed(index),
            None => EvaluationPoint::Random {
                seed: self.scenario.evaluation_seed,
            },
        };
        ScenarioConfig {
            warm_up_steps: self.scenario.warm_up,
            strike_markup: self.scenario.markup,
            strike: self.scenario.strike,
            rate: self.pricing.rate,
            volatility: self.pricing.volatility,
            dividend_yield: self.pricing.dividend_yield,
            evaluation,
        }
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::EnvError(format!("{}={}: {}", key, value, e)))
}

/// Global flags that override configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file path
    pub config_file: Option<PathBuf>,
    /// Output format override
    pub format: Option<OutputFormat>,
    /// Force debug logging
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// A missing default `pathwise.toml` falls back to defaults; a missing file
/// named with `--config` is an error.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env()?;

    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.verbose {
        config.log_level = LogLevel::Debug;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.simulation.initial_price, 100.0);
        assert_eq!(config.simulation.drift, 0.1);
        assert_eq!(config.simulation.volatility, 0.2);
        assert_eq!(config.simulation.horizon, 1.0);
        assert_eq!(config.simulation.steps, 252);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.pricing.rate, 0.03);
        assert_eq!(config.scenario.warm_up, 30);
        assert_eq!(config.scenario.markup, 0.05);
        assert_eq!(config.scenario.evaluation_seed, Some(0));
        assert!(config.simulation.to_parameters().is_ok());
        assert!(config.scenario_config().validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert!(matches!(
            OutputFormat::from_str("xml"),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = CliConfig::from_toml_str(
            r#"
            log_level = "warn"
            format = "json"

            [simulation]
            steps = 504
            seed = 42
            scheme = "iterative"

            [pricing]
            rate = 0.05

            [scenario]
            evaluation_index = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.simulation.steps, 504);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.scheme, PathScheme::IterativeMultiplicative);
        assert_eq!(config.simulation.initial_price, 100.0);
        assert_eq!(config.pricing.rate, 0.05);
        assert_eq!(config.pricing.volatility, 0.2);
        assert_eq!(
            config.scenario_config().evaluation,
            EvaluationPoint::Fixed(100)
        );
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(CliConfig::from_toml_str("format = \"xml\"").is_err());
        assert!(CliConfig::from_toml_str("[simulation]\nscheme = \"euler\"").is_err());
        assert!(CliConfig::from_toml_str("[simulation\n").is_err());
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!("pathwise-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[simulation]\ninitial_price = 50.0\n").unwrap();
        let config = CliConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.simulation.initial_price, 50.0);
    }

    #[test]
    fn test_from_missing_file() {
        let result = CliConfig::from_file(Path::new("/nonexistent/pathwise.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env_from(env(&[
                ("PATHWISE_LOG_LEVEL", "debug"),
                ("PATHWISE_FORMAT", "csv"),
                ("PATHWISE_SEED", "7"),
                ("PATHWISE_STEPS", " 100 "),
                ("PATHWISE_SCHEME", "iterative"),
                ("PATHWISE_RATE", "0.04"),
                ("PATHWISE_DIVIDEND_YIELD", "0.01"),
            ]))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.steps, 100);
        assert_eq!(config.simulation.scheme, PathScheme::IterativeMultiplicative);
        assert_eq!(config.pricing.rate, 0.04);
        assert_eq!(config.pricing.dividend_yield, 0.01);
    }

    #[test]
    fn test_env_parse_errors() {
        let mut config = CliConfig::default();
        let result = config.apply_env_from(env(&[("PATHWISE_STEPS", "many")]));
        assert!(matches!(result, Err(ConfigError::EnvError(_))));

        let result = config.apply_env_from(env(&[("PATHWISE_LOG_LEVEL", "loud")]));
        assert!(matches!(result, Err(ConfigError::InvalidLogLevel(_))));
    }

    #[test]
    fn test_bad_sections_rejected_when_used() {
        let mut config = CliConfig::default();
        config.simulation.steps = 0;
        assert!(matches!(
            config.simulation.to_parameters(),
            Err(ConfigError::InvalidValue(_))
        ));

        let mut config = CliConfig::default();
        config.pricing.dividend_yield = -0.5;
        let err = config.scenario_config().validate().unwrap_err();
        assert_eq!(err.parameter_name(), Some("dividend_yield"));
    }

    #[test]
    fn test_scenario_config_mapping() {
        let mut config = CliConfig::default();
        config.scenario.evaluation_seed = Some(9);
        config.scenario.strike = Some(110.0);
        config.pricing.volatility = 0.25;

        let scenario = config.scenario_config();
        assert_eq!(scenario.evaluation, EvaluationPoint::Random { seed: Some(9) });
        assert_eq!(scenario.strike, Some(110.0));
        assert_eq!(scenario.volatility, 0.25);
        assert_eq!(scenario.warm_up_steps, 30);
    }

    #[test]
    fn test_build_config_cli_precedence() {
        let cli = CliArgs {
            config_file: None,
            format: Some(OutputFormat::Json),
            verbose: true,
        };
        let config = build_config(&cli).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_build_config_missing_explicit_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/custom.toml")),
            ..CliArgs::default()
        };
        assert!(build_config(&cli).is_err());
    }
}
