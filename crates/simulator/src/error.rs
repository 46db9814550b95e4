use analytics::AnalyticsError;
use chrono::NaiveDate;
use core_types::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Not enough data to simulate: {0}")]
    InsufficientData(String),

    #[error("Simulation parameters are invalid: {0}")]
    InvalidParameters(String),

    #[error("Simulated dates run past the representable range after {0}")]
    DateOverflow(NaiveDate),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl SimulationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimulationError::InsufficientData(_) => ErrorKind::InsufficientData,
            SimulationError::InvalidParameters(_) => ErrorKind::InvalidInput,
            SimulationError::DateOverflow(_) => ErrorKind::Internal,
            SimulationError::Analytics(e) => e.kind(),
        }
    }
}
