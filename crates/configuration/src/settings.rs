use crate::error::ConfigError;
use core_types::InvalidPricePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty source yields a
/// usable configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.simulation_count == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.simulation_count must be greater than 0".to_string(),
            ));
        }
        if self.simulation.horizon_days == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.horizon_days must be greater than 0".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Contains parameters for the Monte Carlo simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of independent paths per request.
    pub simulation_count: usize,
    /// Trading days simulated forward from the last observation.
    pub horizon_days: usize,
    /// Raw paths surfaced for the uncertainty fan, besides the predicted one.
    pub fan_paths: usize,
    /// Fixed seed for reproducible runs. Absent means fresh entropy per request.
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            simulation_count: 100,
            horizon_days: 252,
            fan_paths: 4,
            seed: None,
        }
    }
}

/// Contains parameters for shaping the input price series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Trailing calendar window applied before any statistic. Absent means the whole series.
    pub window_days: Option<u32>,
    pub invalid_price_policy: InvalidPricePolicy,
}

/// Contains the logging setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `engine=debug`. `RUST_LOG` takes precedence.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "quantscope.log".to_string(),
        }
    }
}
