use crate::engine::annualized_return;
use crate::error::AnalyticsError;
use core_types::PriceSeries;
use serde::{Deserialize, Serialize};

/// A hypothetical investment to project forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub amount: f64,
    pub years: f64,
}

impl Investment {
    pub fn new(amount: f64, years: f64) -> Self {
        Self { amount, years }
    }

    /// Both figures must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        validate_positive("amount", self.amount)?;
        validate_positive("years", self.years)
    }
}

fn validate_positive(field: &str, value: f64) -> Result<(), AnalyticsError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(AnalyticsError::InvalidInput {
        field: field.to_string(),
        reason: format!("{value} must be a positive finite number"),
    })
}

/// The outcome of compounding an investment at the historical annualized return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub final_amount: f64,
    pub growth_percent: f64,
    pub annualized_return_used: f64,
}

/// Projects `amount * (1 + annualized_return)^years`, where the annualized return
/// is `(last / first)^(252 / (points - 1)) - 1` over the given series.
pub fn project(series: &PriceSeries, investment: Investment) -> Result<ProjectionResult, AnalyticsError> {
    // Checked before any power so NaN never reaches a "successful" result.
    investment.validate()?;

    if series.len() < 2 {
        return Err(AnalyticsError::InsufficientData(format!(
            "projection needs at least 2 prices, got {}",
            series.len()
        )));
    }

    let annualized_return_used =
        annualized_return(series.first().price, series.last().price, series.len() - 1)
            .ok_or_else(|| AnalyticsError::DivisionDegenerate("annualized_return".to_string()))?;

    let final_amount = investment.amount * (1.0 + annualized_return_used).powf(investment.years);
    if !final_amount.is_finite() {
        return Err(AnalyticsError::DivisionDegenerate("final_amount".to_string()));
    }
    let growth_percent = (final_amount - investment.amount) / investment.amount * 100.0;

    tracing::debug!(
        amount = investment.amount,
        years = investment.years,
        annualized_return_used,
        final_amount,
        "Projected compound growth"
    );

    Ok(ProjectionResult {
        final_amount,
        growth_percent,
        annualized_return_used,
    })
}
