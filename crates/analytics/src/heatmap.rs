use crate::error::AnalyticsError;
use core_types::{Calendar, ReturnSeries, UtcCalendar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The aggregated daily change for one calendar month, across all years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// 1 through 12.
    pub month: u32,
    pub mean_daily_change: f64,
}

/// Per-month cells in month order. Months without observations are absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Heatmap {
    cells: Vec<HeatmapCell>,
}

impl Heatmap {
    pub fn cells(&self) -> &[HeatmapCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, month: u32) -> Option<&HeatmapCell> {
        self.cells.iter().find(|c| c.month == month)
    }

    /// The month with the highest value; on ties the later month wins.
    pub fn best_month(&self) -> Option<&HeatmapCell> {
        self.cells.iter().reduce(|best, cell| {
            if best.mean_daily_change > cell.mean_daily_change { best } else { cell }
        })
    }

    /// The month with the lowest value; on ties the later month wins.
    pub fn worst_month(&self) -> Option<&HeatmapCell> {
        self.cells.iter().reduce(|worst, cell| {
            if worst.mean_daily_change < cell.mean_daily_change { worst } else { cell }
        })
    }
}

/// Buckets daily returns by calendar month.
///
/// Each bucket is a running pairwise average in encounter order: the first
/// observation seeds the bucket, and every later one replaces it with
/// `(bucket + observation) / 2`. Recent days therefore weigh more than early
/// ones; this is not the arithmetic mean of the month.
#[derive(Debug, Clone, Default)]
pub struct HeatmapAggregator<C: Calendar = UtcCalendar> {
    calendar: C,
}

impl HeatmapAggregator<UtcCalendar> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Calendar> HeatmapAggregator<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }

    pub fn aggregate(&self, returns: &ReturnSeries) -> Result<Heatmap, AnalyticsError> {
        if returns.is_empty() {
            return Err(AnalyticsError::InsufficientData(
                "heatmap needs at least one daily return".to_string(),
            ));
        }

        let mut buckets: BTreeMap<u32, f64> = BTreeMap::new();
        for point in returns.points() {
            let month = self.calendar.month_of(point.date);
            buckets
                .entry(month)
                .and_modify(|bucket| *bucket = (*bucket + point.value) / 2.0)
                .or_insert(point.value);
        }

        let cells = buckets
            .into_iter()
            .map(|(month, mean_daily_change)| HeatmapCell {
                month,
                mean_daily_change,
            })
            .collect::<Vec<_>>();

        tracing::debug!(months = cells.len(), observations = returns.len(), "Aggregated monthly heatmap");
        Ok(Heatmap { cells })
    }
}
