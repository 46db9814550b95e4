use crate::error::AnalyticsError;
use core_types::ReturnSeries;
use serde::{Deserialize, Serialize};

/// Annualized risk/return figures derived from a price series.
///
/// `None` marks a statistic that is undefined for this input (e.g. a Sharpe
/// ratio over zero volatility). It is never reported as a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Mean daily return scaled by sqrt(252).
    pub annualized_volatility: f64,
    pub annualized_return: Option<f64>, // Option<> because the power can overflow
    pub sharpe_ratio: Option<f64>,      // Option<> for zero or near-zero volatility
}

impl RiskMetrics {
    /// The Sharpe ratio, or `DivisionDegenerate` when it is undefined.
    pub fn require_sharpe(&self) -> Result<f64, AnalyticsError> {
        self.sharpe_ratio
            .ok_or_else(|| AnalyticsError::DivisionDegenerate("sharpe_ratio".to_string()))
    }

    pub fn require_annualized_return(&self) -> Result<f64, AnalyticsError> {
        self.annualized_return
            .ok_or_else(|| AnalyticsError::DivisionDegenerate("annualized_return".to_string()))
    }
}

/// Daily (non-annualized) return statistics, the drift and shock inputs of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub mean_return: f64,
    /// Sample standard deviation (divisor n - 1); `None` with fewer than two returns.
    pub volatility: Option<f64>,
    pub observations: usize,
}

/// Everything the returns & risk calculator derives from one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub returns: ReturnSeries,
    pub metrics: RiskMetrics,
    pub daily: DailyStats,
}

impl RiskReport {
    /// The daily volatility, or `InsufficientData` when fewer than two returns exist.
    pub fn require_daily_volatility(&self) -> Result<f64, AnalyticsError> {
        self.daily.volatility.ok_or_else(|| {
            AnalyticsError::InsufficientData(format!(
                "daily volatility needs at least 2 returns, got {}",
                self.daily.observations
            ))
        })
    }
}
