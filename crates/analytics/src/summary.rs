use crate::heatmap::{Heatmap, HeatmapCell};
use chrono::NaiveDate;
use core_types::PriceSeries;
use serde::{Deserialize, Serialize};

/// Observations looked back for the one-year growth figure.
pub const ONE_YEAR_OBSERVATIONS: usize = 252;

/// Headline facts about an asset, suitable for a dashboard card or a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub latest_date: NaiveDate,
    pub latest_price: f64,
    /// Percent change against the price 252 observations back; `None` with a shorter history.
    pub one_year_growth_pct: Option<f64>,
    pub best_month: Option<HeatmapCell>,
    pub worst_month: Option<HeatmapCell>,
}

/// Summarizes a series and, when available, its heatmap.
pub fn summarize(series: &PriceSeries, heatmap: Option<&Heatmap>) -> AssetSummary {
    let latest = series.last();
    let samples = series.samples();

    let one_year_growth_pct = (samples.len() > ONE_YEAR_OBSERVATIONS)
        .then(|| samples[samples.len() - ONE_YEAR_OBSERVATIONS].price)
        .map(|year_ago| (latest.price - year_ago) / year_ago * 100.0);

    AssetSummary {
        latest_date: latest.date,
        latest_price: latest.price,
        one_year_growth_pct,
        best_month: heatmap.and_then(|h| h.best_month()).copied(),
        worst_month: heatmap.and_then(|h| h.worst_month()).copied(),
    }
}
