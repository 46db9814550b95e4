use serde::{Deserialize, Serialize};

/// What the series builder does with a sample whose price is zero, negative or not finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPricePolicy {
    /// Skip the sample and keep building.
    #[default]
    Drop,
    /// Fail the whole build with `CoreError::InvalidInput`.
    Reject,
}

