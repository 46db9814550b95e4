//! # Quantscope Analytics
//!
//! This crate derives risk/return statistics, monthly performance aggregates and
//! compound-growth projections from an already-materialized price history.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of market-data
//!   providers, rendering or persistence. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every calculator takes a `PriceSeries` or `ReturnSeries`
//!   and returns a fresh value object. Nothing is cached between calls.
//! - **Undefined is not zero:** Statistics that cannot be computed for a given input are
//!   `None`, while structural failures (too little data) are `AnalyticsError`s.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: daily returns, annualized volatility/return and Sharpe ratio.
//! - `HeatmapAggregator`: per-calendar-month running averages of daily changes.
//! - `project`: compound-growth projection of a hypothetical investment.
//! - `summarize`: headline figures (latest price, one-year growth, best/worst month).
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod heatmap;
pub mod projection;
pub mod report;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, RISK_FREE_RATE, TRADING_DAYS_PER_YEAR};
pub use error::AnalyticsError;
pub use heatmap::{Heatmap, HeatmapAggregator, HeatmapCell};
pub use projection::{Investment, ProjectionResult, project};
pub use report::{DailyStats, RiskMetrics, RiskReport};
pub use summary::{AssetSummary, summarize};
