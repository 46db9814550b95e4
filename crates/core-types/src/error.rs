use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The broad category of a failure, shared by every crate in the workspace.
///
/// Presentation layers switch on this to show a neutral "not enough data"
/// message instead of a generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Too few price points or return observations for the requested statistic.
    InsufficientData,
    /// A zero or near-zero denominator produced a non-finite ratio.
    DivisionDegenerate,
    /// A caller-supplied value was non-positive, non-finite or otherwise malformed.
    InvalidInput,
    /// Anything else.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Insufficient data: {required} observations required, {actual} available")]
    InsufficientData { required: usize, actual: usize },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidInput(..) => ErrorKind::InvalidInput,
            CoreError::InsufficientData { .. } => ErrorKind::InsufficientData,
        }
    }
}
