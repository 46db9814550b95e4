use crate::error::EngineError;
use analytics::Investment;
use configuration::Config;
use core_types::{InvalidPricePolicy, PriceSeries, PriceSeriesBuilder, RawSample};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one logical selection. Ids only ever grow; see `SelectionGuard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub(crate) u64);

impl RequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scalar knobs of one analytics request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsParams {
    pub simulation_count: usize,
    pub horizon_days: usize,
    /// Raw paths surfaced for the fan, after the predicted path.
    pub fan_paths: usize,
    pub window_days: Option<u32>,
    pub seed: Option<u64>,
    /// When absent, no projection is computed.
    pub investment: Option<Investment>,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            simulation_count: simulator::DEFAULT_SIMULATION_COUNT,
            horizon_days: simulator::DEFAULT_HORIZON_DAYS,
            fan_paths: 4,
            window_days: None,
            seed: None,
            investment: None,
        }
    }
}

impl AnalyticsParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            simulation_count: config.simulation.simulation_count,
            horizon_days: config.simulation.horizon_days,
            fan_paths: config.simulation.fan_paths,
            window_days: config.data.window_days,
            seed: config.simulation.seed,
            investment: None,
        }
    }

    pub fn with_investment(mut self, investment: Investment) -> Self {
        self.investment = Some(investment);
        self
    }
}

/// One unit of work: a price history plus the parameters to analyze it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    pub id: RequestId,
    pub series: PriceSeries,
    pub params: AnalyticsParams,
}

impl AnalyticsRequest {
    pub fn new(id: RequestId, series: PriceSeries, params: AnalyticsParams) -> Self {
        Self { id, series, params }
    }

    /// Normalizes raw provider samples into a series and wraps them in a request.
    pub fn from_raw<I>(
        id: RequestId,
        samples: I,
        policy: InvalidPricePolicy,
        params: AnalyticsParams,
    ) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = RawSample>,
    {
        let mut builder = PriceSeriesBuilder::new(policy);
        builder.extend(samples);
        let series = builder.build()?;
        Ok(Self::new(id, series, params))
    }
}
