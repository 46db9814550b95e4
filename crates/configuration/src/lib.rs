use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod overrides;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use overrides::Overrides;
pub use settings::{Config, DataSettings, LoggingSettings, SimulationSettings};

/// Prefix of environment overrides, e.g. `QUANTSCOPE__SIMULATION__SEED=7`.
pub const ENV_PREFIX: &str = "QUANTSCOPE";

/// Loads the application configuration from an optional `config.toml` in the
/// working directory, layered under `QUANTSCOPE__*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name("config").required(false), environment())
}

/// Like `load_config`, but the file at `path` must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    build(config::File::from(path).required(true), environment())
}

/// `QUANTSCOPE__SECTION__KEY` variables, layered over the file.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build<S>(file: S, env: config::Environment) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder().add_source(file).add_source(env).build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
