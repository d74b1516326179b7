use std::collections::HashSet;

use tracing::debug;

use crate::errors::CoreError;
use crate::models::order::OrderRecord;
use crate::models::range::DateRange;
use crate::models::report::{DashboardSnapshot, DashboardTotals};
use crate::models::settings::Settings;
use crate::models::summary::DailySummary;
use crate::services::category_service::CategoryService;
use crate::services::daily_service::DailyService;
use crate::services::filter_service::FilterService;
use crate::services::ranking_service::RankingService;

/// Builds a [`DashboardSnapshot`] for one date range.
///
/// Filter → daily series → category breakdown → totals → rankings.
/// Every call starts from the raw records; nothing is carried over between
/// calls.
pub struct ReportService {
    filter_service: FilterService,
    daily_service: DailyService,
    category_service: CategoryService,
    ranking_service: RankingService,
}

impl ReportService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            filter_service: FilterService::new(),
            daily_service: DailyService::new(settings.gap_policy),
            category_service: CategoryService::new(),
            ranking_service: RankingService::new(settings.top_n),
        }
    }

    /// Recompute every dashboard figure for `range`.
    ///
    /// A range selecting nothing yields empty series and zero totals.
    pub fn recompute(
        &self,
        records: &[OrderRecord],
        range: &DateRange,
    ) -> Result<DashboardSnapshot, CoreError> {
        let selected = self.filter_service.filter(records, range);

        let daily = self.daily_service.aggregate(selected.iter().copied())?;
        let categories = self.category_service.aggregate(selected.iter().copied())?;
        let totals = Self::totals(&selected, &daily);
        let rankings = self.ranking_service.rankings(&categories);

        debug!(
            %range,
            line_items = totals.line_items,
            days = daily.len(),
            categories = categories.len(),
            "recomputed dashboard"
        );

        Ok(DashboardSnapshot {
            range: *range,
            daily,
            categories,
            totals,
            rankings,
        })
    }

    fn totals(selected: &[&OrderRecord], daily: &[DailySummary]) -> DashboardTotals {
        let distinct_orders = selected
            .iter()
            .map(|r| r.order_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        DashboardTotals {
            total_orders: daily.iter().map(|d| d.total_orders).sum(),
            distinct_orders,
            total_sales: daily.iter().map(|d| d.total_sales).sum(),
            line_items: selected.len(),
            active_days: daily.iter().filter(|d| d.total_orders > 0).count(),
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
