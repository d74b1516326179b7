use std::cmp::Ordering;

use crate::models::report::{CategoryRankings, RankDirection, RankMetric};
use crate::models::summary::CategorySummary;

/// Picks the best and worst categories out of a category breakdown.
pub struct RankingService {
    top_n: usize,
}

impl RankingService {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// At most `n` categories ordered by `metric`.
    ///
    /// `Top` sorts descending, `Bottom` ascending. Ties are broken by the
    /// label ascending, then the missing-label bucket before a real category
    /// with the same text, so repeated runs give the same lists.
    pub fn rank(
        &self,
        categories: &[CategorySummary],
        metric: RankMetric,
        direction: RankDirection,
        n: usize,
    ) -> Vec<CategorySummary> {
        let mut sorted: Vec<&CategorySummary> = categories.iter().collect();
        sorted.sort_by(|a, b| {
            let by_metric = match metric {
                RankMetric::Orders => a.total_orders.cmp(&b.total_orders),
                RankMetric::Sales => a
                    .total_sales
                    .partial_cmp(&b.total_sales)
                    .unwrap_or(Ordering::Equal),
            };
            let by_metric = match direction {
                RankDirection::Top => by_metric.reverse(),
                RankDirection::Bottom => by_metric,
            };
            by_metric
                .then_with(|| a.label().cmp(b.label()))
                .then_with(|| a.category.is_some().cmp(&b.category.is_some()))
        });
        sorted.into_iter().take(n).cloned().collect()
    }

    /// The four lists drawn by the dashboard, each at most `top_n` long.
    pub fn rankings(&self, categories: &[CategorySummary]) -> CategoryRankings {
        let n = self.top_n;
        CategoryRankings {
            top_by_orders: self.rank(categories, RankMetric::Orders, RankDirection::Top, n),
            bottom_by_orders: self.rank(categories, RankMetric::Orders, RankDirection::Bottom, n),
            top_by_sales: self.rank(categories, RankMetric::Sales, RankDirection::Top, n),
            bottom_by_sales: self.rank(categories, RankMetric::Sales, RankDirection::Bottom, n),
        }
    }
}

impl Default for RankingService {
    fn default() -> Self {
        Self::new(crate::models::settings::DEFAULT_TOP_N)
    }
}
