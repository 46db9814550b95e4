use core_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    InsufficientData(String),

    #[error("Calculation error: degenerate denominator encountered in metric '{0}'")]
    DivisionDegenerate(String),

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalyticsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyticsError::InsufficientData(_) => ErrorKind::InsufficientData,
            AnalyticsError::DivisionDegenerate(_) => ErrorKind::DivisionDegenerate,
            AnalyticsError::InvalidInput { .. } => ErrorKind::InvalidInput,
            AnalyticsError::Core(e) => e.kind(),
        }
    }
}
