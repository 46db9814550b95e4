use analytics::AnalyticsError;
use core_types::{CoreError, ErrorKind};
use simulator::SimulationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Price series error: {0}")]
    Series(#[from] CoreError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Series(e) => e.kind(),
            EngineError::Analytics(e) => e.kind(),
            EngineError::Simulation(e) => e.kind(),
        }
    }

    /// The message a presentation layer shows. Missing data gets a neutral wording.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::InsufficientData => "Not enough data for this selection yet.".to_string(),
            _ => self.to_string(),
        }
    }
}
