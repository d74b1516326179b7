use serde::{Deserialize, Serialize};

use super::range::DateRange;
use super::summary::{CategorySummary, DailySummary};

/// Everything one dashboard render needs, computed for a single date range.
///
/// Snapshots are rebuilt from scratch whenever the range changes and are
/// never cached or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Range the snapshot was computed for
    pub range: DateRange,

    /// Per-day series, ascending by date
    pub daily: Vec<DailySummary>,

    /// Per-category breakdown, in first-appearance order
    pub categories: Vec<CategorySummary>,

    /// Headline metrics
    pub totals: DashboardTotals,

    /// Best and worst categories by orders and by sales
    pub rankings: CategoryRankings,
}

impl DashboardSnapshot {
    /// True when the range selected no line items at all.
    pub fn is_empty(&self) -> bool {
        self.totals.line_items == 0
    }
}

/// Scalar metrics shown above the charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Sum of daily distinct order counts (an order spanning midnight counts twice)
    pub total_orders: usize,

    /// Distinct order ids across the whole range
    pub distinct_orders: usize,

    /// Sum of all line item prices in range
    pub total_sales: f64,

    /// Number of line items in range
    pub line_items: usize,

    /// Days with at least one line item
    pub active_days: usize,
}

/// Which category metric a ranking orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankMetric {
    Orders,
    Sales,
}

impl std::fmt::Display for RankMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankMetric::Orders => write!(f, "Total Orders"),
            RankMetric::Sales => write!(f, "Total Sales"),
        }
    }
}

/// Best (descending) or worst (ascending) end of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDirection {
    Top,
    Bottom,
}

/// The four category rankings drawn by the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRankings {
    pub top_by_orders: Vec<CategorySummary>,
    pub bottom_by_orders: Vec<CategorySummary>,
    pub top_by_sales: Vec<CategorySummary>,
    pub bottom_by_sales: Vec<CategorySummary>,
}

impl CategoryRankings {
    pub fn get(&self, metric: RankMetric, direction: RankDirection) -> &[CategorySummary] {
        match (metric, direction) {
            (RankMetric::Orders, RankDirection::Top) => &self.top_by_orders,
            (RankMetric::Orders, RankDirection::Bottom) => &self.bottom_by_orders,
            (RankMetric::Sales, RankDirection::Top) => &self.top_by_sales,
            (RankMetric::Sales, RankDirection::Bottom) => &self.bottom_by_sales,
        }
    }
}
