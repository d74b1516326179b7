use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Inclusive calendar-date range `[start, end]`.
///
/// A range always satisfies `start <= end`; reversed input is rejected at
/// construction so it can never reach the aggregators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form; deserialization goes through [`DateRange::new`].
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CoreError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::ReversedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered (always >= 1).
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// True when `ts` falls within `[start 00:00:00, end 23:59:59.999…]`.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.contains_date(ts.date())
    }

    /// Iterate every calendar day in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Clamp this range into `bounds`.
    ///
    /// If the two ranges do not overlap the result collapses onto the nearest
    /// bound, so a range far in the past becomes `[bounds.start, bounds.start]`.
    pub fn clamp_to(&self, bounds: &DateRange) -> DateRange {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(bounds.start, bounds.end);
        DateRange { start, end }
    }

    /// Move both ends by `days` (negative moves backwards).
    pub fn shift(&self, days: i64) -> Option<DateRange> {
        let delta = Duration::days(days);
        Some(DateRange {
            start: self.start.checked_add_signed(delta)?,
            end: self.end.checked_add_signed(delta)?,
        })
    }

    /// Move only the start date. Fails if it would pass the end date.
    pub fn with_start(&self, start: NaiveDate) -> Result<DateRange, CoreError> {
        DateRange::new(start, self.end)
    }

    /// Move only the end date. Fails if it would precede the start date.
    pub fn with_end(&self, end: NaiveDate) -> Result<DateRange, CoreError> {
        DateRange::new(self.start, end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}
