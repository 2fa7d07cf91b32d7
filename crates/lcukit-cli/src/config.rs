//! Configuration for the lcukit CLI.
//!
//! Supports loading configuration from:
//! 1. A YAML configuration file (`--config`)
//! 2. Environment variables (with `LCUKIT_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Log level override.
pub const ENV_LOG_LEVEL: &str = "LCUKIT_LOG_LEVEL";
/// Default shot count override.
pub const ENV_SHOTS: &str = "LCUKIT_SHOTS";
/// Simulator seed override.
pub const ENV_SEED: &str = "LCUKIT_SEED";
/// Output format override.
pub const ENV_OUTPUT_FORMAT: &str = "LCUKIT_OUTPUT_FORMAT";

/// Largest register the CLI will simulate.
pub const MAX_SIMULATED_QUBITS: u32 = 24;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Simulator settings for `--shots` and `run`
    pub simulator: SimulatorConfig,

    /// How results are written
    pub output: OutputConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

/// Simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Shots used by `run` when `--shots` is absent
    pub shots: u32,

    /// Fixed RNG seed for reproducible counts
    pub seed: Option<u64>,

    /// Widest circuit the simulator accepts
    pub max_qubits: u32,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Format written to stdout
    pub format: OutputFormat,

    /// Pretty-print JSON
    pub pretty: bool,
}

/// Result format on stdout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Machine-readable JSON
    Json,
    /// Human-readable summary
    #[default]
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "summary" => Ok(OutputFormat::Summary),
            other => Err(ConfigError::ValidationError(format!(
                "Invalid output format: {other} (expected json or summary)"
            ))),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_shots() -> u32 {
    1024
}

fn default_max_qubits() -> u32 {
    lcukit_adapter_sim::DEFAULT_MAX_QUBITS
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            shots: default_shots(),
            seed: None,
            max_qubits: default_max_qubits(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // an empty file is a valid, all-default configuration
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that `lookup` reports as set override the current
    /// values.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = v;
        }
        if let Some(v) = lookup(ENV_SHOTS) {
            self.simulator.shots = parse_env(ENV_SHOTS, &v)?;
        }
        if let Some(v) = lookup(ENV_SEED) {
            self.simulator.seed = Some(parse_env(ENV_SEED, &v)?);
        }
        if let Some(v) = lookup(ENV_OUTPUT_FORMAT) {
            self.output.format = v.parse()?;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        if self.simulator.shots == 0 {
            return Err(ConfigError::ValidationError(
                "simulator.shots must be greater than 0".to_string(),
            ));
        }

        if self.simulator.max_qubits == 0 || self.simulator.max_qubits > MAX_SIMULATED_QUBITS {
            return Err(ConfigError::ValidationError(format!(
                "simulator.max_qubits must be between 1 and {MAX_SIMULATED_QUBITS}, got {}",
                self.simulator.max_qubits
            )));
        }

        Ok(())
    }

    /// Tracing filter directive for the given `-v` count.
    ///
    /// Any `-v` wins over the configured level.
    pub fn log_filter(&self, verbose: u8) -> &str {
        match verbose {
            0 => &self.logging.level,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{key}: cannot parse '{value}'")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
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
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.simulator.shots, 1024);
        assert_eq!(config.simulator.seed, None);
        assert_eq!(config.output.format, OutputFormat::Summary);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("simulator:\n  seed: 7\n").unwrap();
        assert_eq!(config.simulator.seed, Some(7));
        assert_eq!(config.simulator.shots, 1024);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            Config::from_yaml("simulator:\n  shot: 5\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulator.shots = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulator.max_qubits = MAX_SIMULATED_QUBITS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .merge_env(env(&[
                (ENV_LOG_LEVEL, "debug"),
                (ENV_SHOTS, "500"),
                (ENV_SEED, "42"),
                (ENV_OUTPUT_FORMAT, "JSON"),
            ]))
            .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.simulator.shots, 500);
        assert_eq!(config.simulator.seed, Some(42));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_env_parse_failure() {
        assert!(Config::default().merge_env(env(&[(ENV_SHOTS, "many")])).is_err());
        assert!(Config::default().merge_env(env(&[(ENV_OUTPUT_FORMAT, "xml")])).is_err());
    }

    #[test]
    fn test_log_filter() {
        let config = Config::default();
        assert_eq!(config.log_filter(0), "warn");
        assert_eq!(config.log_filter(2), "debug");
        assert_eq!(config.log_filter(9), "trace");
    }
}
