//! # Quantscope Simulator
//!
//! Monte Carlo generation of future price paths from historical drift and volatility.
//!
//! Randomness is injected through `ShockSource`, so callers choose between seeded
//! uniform shocks for production runs and scripted sequences for exact tests.
//! Paths are mutually independent and are generated in parallel with `rayon`.

pub mod bundle;
pub mod error;
pub mod monte_carlo;
pub mod random;

pub use bundle::{SimulationBundle, SimulationPath};
pub use error::SimulationError;
pub use monte_carlo::{
    DEFAULT_HORIZON_DAYS, DEFAULT_SIMULATION_COUNT, MonteCarloSimulator, SimulationParams,
};
pub use random::{ScriptedShocks, SeededUniform, ShockSource, ShockStream};
