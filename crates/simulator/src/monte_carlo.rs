use crate::bundle::{SimulationBundle, SimulationPath};
use crate::error::SimulationError;
use crate::random::{ShockSource, ShockStream};
use analytics::RiskReport;
use chrono::NaiveDate;
use core_types::{Calendar, PricePoint, PriceSample, UtcCalendar};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIMULATION_COUNT: usize = 100;
pub const DEFAULT_HORIZON_DAYS: usize = 252;

/// Drift, shock amplitude and size of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Mean daily return (the drift).
    pub daily_mean_return: f64,
    /// Sample standard deviation of daily returns (the shock amplitude).
    pub daily_volatility: f64,
    pub simulation_count: usize,
    pub horizon_days: usize,
}

impl SimulationParams {
    pub fn new(daily_mean_return: f64, daily_volatility: f64) -> Self {
        Self {
            daily_mean_return,
            daily_volatility,
            simulation_count: DEFAULT_SIMULATION_COUNT,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Takes drift and volatility from a risk report.
    ///
    /// Fails fast with `InsufficientData` when the report has no daily volatility
    /// (fewer than two returns) instead of simulating with an undefined amplitude.
    pub fn from_risk_report(report: &RiskReport) -> Result<Self, SimulationError> {
        let volatility = report.daily.volatility.ok_or_else(|| {
            SimulationError::InsufficientData(format!(
                "daily volatility needs at least 2 returns, got {}",
                report.daily.observations
            ))
        })?;
        Ok(Self::new(report.daily.mean_return, volatility))
    }

    pub fn with_simulation_count(mut self, simulation_count: usize) -> Self {
        self.simulation_count = simulation_count;
        self
    }

    pub fn with_horizon_days(mut self, horizon_days: usize) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.simulation_count == 0 {
            return Err(SimulationError::InvalidParameters(
                "simulation_count must be greater than 0".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(SimulationError::InvalidParameters(
                "horizon_days must be greater than 0".to_string(),
            ));
        }
        if !self.daily_mean_return.is_finite() {
            return Err(SimulationError::InvalidParameters(format!(
                "daily_mean_return {} is not finite",
                self.daily_mean_return
            )));
        }
        if !self.daily_volatility.is_finite() || self.daily_volatility < 0.0 {
            return Err(SimulationError::InvalidParameters(format!(
                "daily_volatility {} must be finite and non-negative",
                self.daily_volatility
            )));
        }
        Ok(())
    }
}

/// Generates independent future price paths from a historical starting point.
///
/// Each day draws `mean + volatility * U` with `U` uniform on `[-1, 1]` and
/// multiplies the running price by `1 + draw`. The growth factor is floored at
/// zero, so a path that loses everything stays at zero.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloSimulator<C: Calendar = UtcCalendar> {
    calendar: C,
}

impl MonteCarloSimulator<UtcCalendar> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Calendar> MonteCarloSimulator<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }

    /// Runs `simulation_count` paths of `horizon_days` steps, each seeded at `start`.
    ///
    /// Paths are generated in parallel. Path `i` only ever reads `source.stream(i)`,
    /// so the bundle is identical regardless of scheduling.
    pub fn simulate<S: ShockSource>(
        &self,
        params: &SimulationParams,
        start: PriceSample,
        source: &S,
    ) -> Result<SimulationBundle, SimulationError> {
        params.validate()?;
        if !start.has_valid_price() {
            return Err(SimulationError::InvalidParameters(format!(
                "start price {} must be positive and finite",
                start.price
            )));
        }

        let dates = self.forward_dates(start.date, params.horizon_days)?;

        let paths: Vec<SimulationPath> = (0..params.simulation_count)
            .into_par_iter()
            .map(|index| {
                let mut stream = source.stream(index);
                Self::simulate_path(params, start.price, &dates, &mut stream)
            })
            .collect();

        let bundle = SimulationBundle::new(params.horizon_days, paths);
        tracing::debug!(
            paths = bundle.len(),
            horizon = params.horizon_days,
            mean_terminal = ?bundle.mean_terminal_price(),
            "Monte Carlo simulation complete"
        );
        Ok(bundle)
    }

    /// `start` followed by the next `horizon` calendar days.
    fn forward_dates(&self, start: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>, SimulationError> {
        let mut dates = Vec::with_capacity(horizon + 1);
        dates.push(start);
        let mut current = start;
        for _ in 0..horizon {
            current = self
                .calendar
                .next_day(current)
                .ok_or(SimulationError::DateOverflow(current))?;
            dates.push(current);
        }
        Ok(dates)
    }

    fn simulate_path<T: ShockStream>(
        params: &SimulationParams,
        start_price: f64,
        dates: &[NaiveDate],
        stream: &mut T,
    ) -> SimulationPath {
        let mut price = start_price;
        let points = dates
            .iter()
            .enumerate()
            .map(|(step, &date)| {
                if step > 0 {
                    let drawn = params.daily_mean_return + params.daily_volatility * stream.next_shock();
                    price *= (1.0 + drawn).max(0.0);
                }
                PricePoint { date, price }
            })
            .collect();
        SimulationPath::new(points)
    }
}
