use crate::calendar::Calendar;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical observation: the price of the asset on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub date: NaiveDate,
    pub price: f64,
}

impl PriceSample {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// A price is usable when it is finite and strictly positive.
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// A dated price produced by a computation rather than observed.
///
/// Simulated paths use this type; unlike `PriceSample` it carries no
/// positivity guarantee (a simulated price may decay to zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl From<PriceSample> for PricePoint {
    fn from(sample: PriceSample) -> Self {
        Self {
            date: sample.date,
            price: sample.price,
        }
    }
}

/// An ordered, deduplicated, non-empty price history for one asset.
///
/// Dates are strictly increasing and every price is finite and positive.
/// The series is immutable once constructed; windowing produces a new series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceSample>", into = "Vec<PriceSample>")]
pub struct PriceSeries {
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    /// Validates already-normalized samples. Use `PriceSeriesBuilder` for raw input.
    pub fn new(samples: Vec<PriceSample>) -> Result<Self, CoreError> {
        if samples.is_empty() {
            return Err(CoreError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        if let Some(bad) = samples.iter().find(|s| !s.has_valid_price()) {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("{} on {} is not a positive finite number", bad.price, bad.date),
            ));
        }

        if let Some(pair) = samples.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(CoreError::InvalidInput(
                "date".to_string(),
                format!("{} does not strictly follow {}", pair[1].date, pair[0].date),
            ));
        }

        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn first(&self) -> &PriceSample {
        &self.samples[0]
    }

    pub fn last(&self) -> &PriceSample {
        &self.samples[self.samples.len() - 1]
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.price)
    }

    /// Keeps the samples dated on or after `last_date - days`.
    ///
    /// The last sample always survives, so the result is never empty.
    pub fn trailing_window<C: Calendar + ?Sized>(&self, days: u32, calendar: &C) -> PriceSeries {
        let cutoff = calendar.days_before(self.last().date, days);
        let start = self.samples.partition_point(|s| s.date < cutoff);
        PriceSeries {
            samples: self.samples[start..].to_vec(),
        }
    }
}

impl TryFrom<Vec<PriceSample>> for PriceSeries {
    type Error = CoreError;

    fn try_from(samples: Vec<PriceSample>) -> Result<Self, Self::Error> {
        PriceSeries::new(samples)
    }
}

impl From<PriceSeries> for Vec<PriceSample> {
    fn from(series: PriceSeries) -> Self {
        series.samples
    }
}

/// A single simple daily return, dated with the later of the two prices it spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered daily returns derived from a `PriceSeries`. May be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReturnPoint>", into = "Vec<ReturnPoint>")]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn new(points: Vec<ReturnPoint>) -> Result<Self, CoreError> {
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(CoreError::InvalidInput(
                "return".to_string(),
                format!("value on {} is not finite", bad.date),
            ));
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(CoreError::InvalidInput(
                "date".to_string(),
                format!("{} does not strictly follow {}", pair[1].date, pair[0].date),
            ));
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

impl TryFrom<Vec<ReturnPoint>> for ReturnSeries {
    type Error = CoreError;

    fn try_from(points: Vec<ReturnPoint>) -> Result<Self, Self::Error> {
        ReturnSeries::new(points)
    }
}

impl From<ReturnSeries> for Vec<ReturnPoint> {
    fn from(series: ReturnSeries) -> Self {
        series.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::UtcCalendar;
    use crate::error::ErrorKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn series_rejects_empty_input() {
        let err = PriceSeries::new(vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn series_rejects_zero_price() {
        let err = PriceSeries::new(vec![PriceSample::new(day(1), 0.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn series_rejects_duplicate_dates() {
        let err = PriceSeries::new(vec![
            PriceSample::new(day(1), 1.0),
            PriceSample::new(day(1), 2.0),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn single_sample_series_is_valid() {
        let series = PriceSeries::new(vec![PriceSample::new(day(5), 42.0)]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.first(), series.last());
    }

    #[test]
    fn trailing_window_keeps_cutoff_day_and_last_sample() {
        let series = PriceSeries::new((1..=10).map(|d| PriceSample::new(day(d), d as f64)).collect())
            .unwrap();

        let window = series.trailing_window(3, &UtcCalendar);
        let dates: Vec<_> = window.samples().iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(7), day(8), day(9), day(10)]);

        let single = series.trailing_window(0, &UtcCalendar);
        assert_eq!(single.len(), 1);
        assert_eq!(single.last().date, day(10));

        assert_eq!(series.trailing_window(365, &UtcCalendar), series);
    }

    #[test]
    fn series_deserialization_validates() {
        let ok: PriceSeries =
            serde_json::from_str(r#"[{"date":"2024-01-01","price":1.5},{"date":"2024-01-02","price":2.0}]"#)
                .unwrap();
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<PriceSeries>(
            r#"[{"date":"2024-01-02","price":1.5},{"date":"2024-01-01","price":2.0}]"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn return_series_rejects_non_finite_values() {
        let err = ReturnSeries::new(vec![ReturnPoint {
            date: day(2),
            value: f64::NAN,
        }])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(ReturnSeries::new(vec![]).unwrap().is_empty());
    }
}
