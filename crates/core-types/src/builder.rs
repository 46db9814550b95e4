use crate::calendar::{Calendar, UtcCalendar};
use crate::enums::InvalidPricePolicy;
use crate::error::CoreError;
use crate::structs::{PriceSample, PriceSeries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A price exactly as delivered by a market-data collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl RawSample {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Builds a sample from a Unix timestamp in milliseconds.
    pub fn from_millis(millis: i64, price: f64) -> Result<Self, CoreError> {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            CoreError::InvalidInput("timestamp".to_string(), format!("{millis} is out of range"))
        })?;
        Ok(Self { timestamp, price })
    }
}

/// Bookkeeping from a single build, useful for data-quality reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub received: usize,
    /// Samples skipped because of a non-positive or non-finite price.
    pub dropped_invalid: usize,
    /// Samples replaced by a later sample on the same date.
    pub collapsed: usize,
}

/// Normalizes raw `(timestamp, price)` samples into a `PriceSeries`.
///
/// Timestamps are truncated to their UTC date. Samples are stably ordered by
/// timestamp and, when several fall on the same date, the latest one wins.
#[derive(Debug, Clone)]
pub struct PriceSeriesBuilder<C: Calendar = UtcCalendar> {
    policy: InvalidPricePolicy,
    calendar: C,
    samples: Vec<RawSample>,
}

impl PriceSeriesBuilder<UtcCalendar> {
    pub fn new(policy: InvalidPricePolicy) -> Self {
        Self::with_calendar(policy, UtcCalendar)
    }
}

impl Default for PriceSeriesBuilder<UtcCalendar> {
    fn default() -> Self {
        Self::new(InvalidPricePolicy::default())
    }
}

impl<C: Calendar> PriceSeriesBuilder<C> {
    pub fn with_calendar(policy: InvalidPricePolicy, calendar: C) -> Self {
        Self {
            policy,
            calendar,
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: RawSample) -> &mut Self {
        self.samples.push(sample);
        self
    }

    pub fn extend<I: IntoIterator<Item = RawSample>>(&mut self, samples: I) -> &mut Self {
        self.samples.extend(samples);
        self
    }

    pub fn build(self) -> Result<PriceSeries, CoreError> {
        self.build_with_report().map(|(series, _)| series)
    }

    /// Builds the series and reports how many samples were dropped or collapsed.
    ///
    /// Fails with `InsufficientData` when fewer than two dates survive, since
    /// every downstream statistic needs at least one return.
    pub fn build_with_report(self) -> Result<(PriceSeries, BuildReport), CoreError> {
        let mut report = BuildReport {
            received: self.samples.len(),
            ..BuildReport::default()
        };

        let mut valid = Vec::with_capacity(self.samples.len());
        for raw in self.samples {
            if raw.price.is_finite() && raw.price > 0.0 {
                valid.push(raw);
                continue;
            }
            match self.policy {
                InvalidPricePolicy::Drop => {
                    tracing::debug!(timestamp = %raw.timestamp, price = raw.price, "Dropping sample with invalid price");
                    report.dropped_invalid += 1;
                }
                InvalidPricePolicy::Reject => {
                    return Err(CoreError::InvalidInput(
                        "price".to_string(),
                        format!("{} at {} is not a positive finite number", raw.price, raw.timestamp),
                    ));
                }
            }
        }

        // Stable, so equal timestamps keep their arrival order and the last one wins below.
        valid.sort_by_key(|raw| raw.timestamp);

        let mut samples: Vec<PriceSample> = Vec::with_capacity(valid.len());
        for raw in valid {
            let date = self.calendar.date_of(raw.timestamp);
            match samples.last_mut() {
                Some(prev) if prev.date == date => {
                    prev.price = raw.price;
                    report.collapsed += 1;
                }
                _ => samples.push(PriceSample::new(date, raw.price)),
            }
        }

        if samples.len() < 2 {
            return Err(CoreError::InsufficientData {
                required: 2,
                actual: samples.len(),
            });
        }

        if report.dropped_invalid > 0 {
            tracing::warn!(
                dropped = report.dropped_invalid,
                received = report.received,
                "Dropped samples with non-positive or non-finite prices"
            );
        }

        let series = PriceSeries::new(samples)?;
        tracing::debug!(points = series.len(), collapsed = report.collapsed, "Built price series");
        Ok((series, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::{NaiveDate, TimeZone};
    use rstest::rstest;

    const DAY_MS: i64 = 86_400_000;

    fn raw(day: i64, price: f64) -> RawSample {
        RawSample::from_millis(1_704_067_200_000 + day * DAY_MS, price).unwrap() // 2024-01-01
    }

    #[test]
    fn builds_ordered_series_from_daily_samples() {
        let mut builder = PriceSeriesBuilder::default();
        builder.extend([raw(0, 100.0), raw(1, 110.0), raw(2, 121.0)]);
        let series = builder.build().unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first().date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(series.last().price, 121.0);
    }

    #[test]
    fn intraday_samples_collapse_to_the_latest() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 2, 18, 30, 0).unwrap();

        let mut builder = PriceSeriesBuilder::default();
        builder
            .push(raw(0, 100.0))
            .push(RawSample::new(late, 105.0))
            .push(RawSample::new(noon, 103.0));
        let (series, report) = builder.build_with_report().unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.last().price, 105.0);
        assert_eq!(report.collapsed, 1);
    }

    #[test]
    fn out_of_order_input_is_sorted() {
        let mut builder = PriceSeriesBuilder::default();
        builder.extend([raw(2, 3.0), raw(0, 1.0), raw(1, 2.0)]);
        let prices: Vec<f64> = builder.build().unwrap().prices().collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-4.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn drop_policy_skips_invalid_prices(#[case] bad: f64) {
        let mut builder = PriceSeriesBuilder::new(InvalidPricePolicy::Drop);
        builder.extend([raw(0, 10.0), raw(1, bad), raw(2, 12.0)]);
        let (series, report) = builder.build_with_report().unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(report.dropped_invalid, 1);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-4.0)]
    #[case(f64::NAN)]
    fn reject_policy_fails_on_invalid_prices(#[case] bad: f64) {
        let mut builder = PriceSeriesBuilder::new(InvalidPricePolicy::Reject);
        builder.extend([raw(0, 10.0), raw(1, bad), raw(2, 12.0)]);
        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![raw(0, 10.0)])]
    #[case(vec![raw(0, 10.0), raw(0, 11.0)])]
    #[case(vec![raw(0, 10.0), raw(1, 0.0)])]
    fn fewer_than_two_surviving_dates_is_insufficient(#[case] input: Vec<RawSample>) {
        let mut builder = PriceSeriesBuilder::default();
        builder.extend(input);
        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn out_of_range_millis_is_invalid_input() {
        let err = RawSample::from_millis(i64::MAX, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
