use crate::settings::Config;
use std::path::PathBuf;

/// Per-invocation values that win over the loaded configuration.
///
/// With the `clap` feature this doubles as a flattened argument group.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct Overrides {
    /// Number of simulated paths.
    #[cfg_attr(feature = "clap", arg(long))]
    pub simulations: Option<usize>,

    /// Trading days to simulate forward.
    #[cfg_attr(feature = "clap", arg(long))]
    pub horizon: Option<usize>,

    /// Raw paths to surface besides the predicted one.
    #[cfg_attr(feature = "clap", arg(long))]
    pub fan_paths: Option<usize>,

    /// Seed for reproducible simulations.
    #[cfg_attr(feature = "clap", arg(long))]
    pub seed: Option<u64>,

    /// Trailing calendar window, in days, applied before any statistic.
    #[cfg_attr(feature = "clap", arg(long))]
    pub days: Option<u32>,

    /// Logging filter directive (e.g. "debug").
    #[cfg_attr(feature = "clap", arg(long))]
    pub log_level: Option<String>,

    /// Directory for the rolling log file.
    #[cfg_attr(feature = "clap", arg(long))]
    pub log_dir: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(simulations) = self.simulations {
            config.simulation.simulation_count = simulations;
        }
        if let Some(horizon) = self.horizon {
            config.simulation.horizon_days = horizon;
        }
        if let Some(fan_paths) = self.fan_paths {
            config.simulation.fan_paths = fan_paths;
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
        if self.days.is_some() {
            config.data.window_days = self.days;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.log_dir.is_some() {
            config.logging.directory = self.log_dir.clone();
        }
    }
}
