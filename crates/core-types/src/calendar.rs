use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Date arithmetic used by the series builder, the simulator and the heatmap.
///
/// Going through this trait instead of ad-hoc `chrono` calls keeps day stepping
/// and month bucketing identical across hosts, and lets tests pin the rules.
pub trait Calendar: Send + Sync {
    /// The calendar date a timestamp belongs to.
    fn date_of(&self, timestamp: DateTime<Utc>) -> NaiveDate;

    /// The day after `date`, or `None` past the representable range.
    fn next_day(&self, date: NaiveDate) -> Option<NaiveDate>;

    /// Calendar month of `date`, 1 through 12.
    fn month_of(&self, date: NaiveDate) -> u32;

    /// `date` moved back by `days` calendar days, saturating at the earliest representable date.
    fn days_before(&self, date: NaiveDate, days: u32) -> NaiveDate;
}

/// The proleptic Gregorian calendar with UTC day boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtcCalendar;

impl Calendar for UtcCalendar {
    fn date_of(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.date_naive()
    }

    fn next_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.succ_opt()
    }

    fn month_of(&self, date: NaiveDate) -> u32 {
        date.month()
    }

    fn days_before(&self, date: NaiveDate, days: u32) -> NaiveDate {
        date.checked_sub_days(chrono::Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN)
    }
}
