use chrono::Days;

use crate::models::order::OrderRecord;
use crate::models::range::DateRange;

/// Selects the records that feed the aggregators.
///
/// Pure business logic: borrows records, never copies or mutates them.
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// Records purchased within `range` (both ends inclusive, whole days).
    pub fn filter<'a, I>(&self, records: I, range: &DateRange) -> Vec<&'a OrderRecord>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        records
            .into_iter()
            .filter(|r| range.contains(&r.purchased_at))
            .collect()
    }

    /// Earliest and latest purchase date, or `None` for an empty dataset.
    pub fn date_bounds<'a, I>(&self, records: I) -> Option<DateRange>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut iter = records.into_iter().map(OrderRecord::purchase_date);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        DateRange::new(min, max).ok()
    }

    /// The initial range: `[latest - window_days, latest]`, never starting
    /// before the earliest purchase.
    pub fn default_range<'a, I>(&self, records: I, window_days: i64) -> Option<DateRange>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let bounds = self.date_bounds(records)?;
        let window = Days::new(window_days.max(0).unsigned_abs());
        let start = bounds
            .end()
            .checked_sub_days(window)
            .unwrap_or(bounds.start())
            .max(bounds.start());
        Some(DateRange::new(start, bounds.end()).unwrap_or(bounds))
    }
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}
