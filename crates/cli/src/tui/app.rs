use order_dashboard_core::errors::CoreError;
use order_dashboard_core::models::currency::CurrencyFormat;
use order_dashboard_core::models::range::DateRange;
use order_dashboard_core::models::report::{DashboardSnapshot, RankMetric};
use order_dashboard_core::OrderDashboard;
use tracing::{debug, warn};

/// State of the interactive dashboard.
///
/// The snapshot always matches `range`: every range change goes through
/// [`App::set_range`], which recomputes from the raw records.
pub struct App {
    dashboard: OrderDashboard,
    pub bounds: DateRange,
    pub default_range: DateRange,
    pub range: DateRange,
    pub snapshot: DashboardSnapshot,
    pub ranking_metric: RankMetric,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(dashboard: OrderDashboard, initial: DateRange) -> Result<Self, CoreError> {
        let bounds = dashboard.date_bounds().ok_or(CoreError::EmptyDataset)?;
        let default_range = dashboard.default_range()?;
        let range = initial.clamp_to(&bounds);
        let snapshot = dashboard.recompute(&range)?;

        Ok(Self {
            dashboard,
            bounds,
            default_range,
            range,
            snapshot,
            ranking_metric: RankMetric::Orders,
            status: None,
            should_quit: false,
        })
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.dashboard.settings().currency
    }

    pub fn record_count(&self) -> usize {
        self.dashboard.record_count()
    }

    /// Move the start date by `days`, never past the end date or the
    /// earliest purchase.
    pub fn move_start(&mut self, days: i64) {
        let Some(start) = self
            .range
            .start()
            .checked_add_signed(chrono::Duration::days(days))
        else {
            return;
        };
        match self.range.with_start(start.max(self.bounds.start())) {
            Ok(range) => self.set_range(range),
            Err(_) => self.status = Some("Start date cannot be after the end date".to_string()),
        }
    }

    /// Move the end date by `days`, never before the start date or past the
    /// latest purchase.
    pub fn move_end(&mut self, days: i64) {
        let Some(end) = self
            .range
            .end()
            .checked_add_signed(chrono::Duration::days(days))
        else {
            return;
        };
        match self.range.with_end(end.min(self.bounds.end())) {
            Ok(range) => self.set_range(range),
            Err(_) => self.status = Some("End date cannot be before the start date".to_string()),
        }
    }

    /// Slide the whole window by up to `days`, stopping at the dataset bounds.
    pub fn shift_window(&mut self, days: i64) {
        let room = if days < 0 {
            -(self.range.start() - self.bounds.start()).num_days()
        } else {
            (self.bounds.end() - self.range.end()).num_days()
        };
        let delta = if days < 0 { days.max(room) } else { days.min(room) };
        if delta == 0 {
            self.status = Some("Window is already at the edge of the dataset".to_string());
            return;
        }
        if let Some(range) = self.range.shift(delta) {
            self.set_range(range);
        }
    }

    /// Slide the window by its own length.
    pub fn page(&mut self, forward: bool) {
        let len = self.range.num_days();
        self.shift_window(if forward { len } else { -len });
    }

    pub fn reset_range(&mut self) {
        self.set_range(self.default_range);
    }

    pub fn toggle_metric(&mut self) {
        self.ranking_metric = match self.ranking_metric {
            RankMetric::Orders => RankMetric::Sales,
            RankMetric::Sales => RankMetric::Orders,
        };
    }

    /// Range-change handler: clamp, recompute, swap in the new snapshot.
    /// On failure the previous range and snapshot stay on screen.
    pub fn set_range(&mut self, range: DateRange) {
        let range = range.clamp_to(&self.bounds);
        if range == self.range {
            return;
        }
        match self.dashboard.recompute(&range) {
            Ok(snapshot) => {
                debug!(%range, "range changed");
                self.range = range;
                self.snapshot = snapshot;
                self.status = None;
            }
            Err(e) => {
                warn!(%range, error = %e, "recompute failed");
                self.status = Some(e.to_string());
            }
        }
    }
}
