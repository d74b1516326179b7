use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::errors::CoreError;
use crate::models::order::OrderRecord;
use crate::models::range::DateRange;
use crate::models::settings::GapPolicy;
use crate::models::summary::DailySummary;

/// Groups line items into calendar-day buckets.
///
/// Per day: distinct order ids (an order with several line items counts once)
/// and the sum of line item prices. Output is ascending by date.
pub struct DailyService {
    gap_policy: GapPolicy,
}

impl DailyService {
    pub fn new(gap_policy: GapPolicy) -> Self {
        Self { gap_policy }
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    /// Aggregate `records` into one [`DailySummary`] per day.
    ///
    /// With [`GapPolicy::ZeroFill`] every day between the first and last
    /// observed day is emitted; days without purchases carry zero totals.
    /// Fails with `InvalidInput` if any price is not a finite number.
    pub fn aggregate<'a, I>(&self, records: I) -> Result<Vec<DailySummary>, CoreError>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut buckets: BTreeMap<NaiveDate, (HashSet<&'a str>, f64)> = BTreeMap::new();

        for record in records {
            if !record.price.is_finite() {
                return Err(CoreError::InvalidInput(format!(
                    "order {} has non-numeric price {}",
                    record.order_id, record.price
                )));
            }
            let (orders, sales) = buckets.entry(record.purchase_date()).or_default();
            orders.insert(record.order_id.as_str());
            *sales += record.price;
        }

        let observed = buckets
            .into_iter()
            .map(|(date, (orders, sales))| DailySummary {
                date,
                total_orders: orders.len(),
                total_sales: sales,
            })
            .collect::<Vec<_>>();

        Ok(match self.gap_policy {
            GapPolicy::Sparse => observed,
            GapPolicy::ZeroFill => Self::zero_fill(observed),
        })
    }

    /// Insert zero-total entries for missing days between the first and last
    /// entry of an ascending series.
    fn zero_fill(observed: Vec<DailySummary>) -> Vec<DailySummary> {
        let span = match (observed.first(), observed.last()) {
            (Some(first), Some(last)) => match DateRange::new(first.date, last.date) {
                Ok(span) => span,
                Err(_) => return observed,
            },
            _ => return observed,
        };

        let mut filled = Vec::with_capacity(span.num_days() as usize);
        let mut observed = observed.into_iter().peekable();
        for day in span.days() {
            match observed.next_if(|s| s.date == day) {
                Some(summary) => filled.push(summary),
                None => filled.push(DailySummary::empty(day)),
            }
        }
        filled
    }
}

impl Default for DailyService {
    fn default() -> Self {
        Self::new(GapPolicy::default())
    }
}
