pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use std::path::Path;

use models::{
    currency::CurrencyFormat,
    order::OrderRecord,
    range::DateRange,
    report::DashboardSnapshot,
    settings::Settings,
    summary::{CategorySummary, DailySummary},
};
use services::{
    category_service::CategoryService, daily_service::DailyService,
    filter_service::FilterService, report_service::ReportService,
};
use storage::manager::DatasetManager;

use errors::CoreError;

/// Main entry point for the order dashboard core library.
/// Holds the loaded dataset, the active settings and the services that
/// turn a date range into dashboard figures.
#[must_use]
pub struct OrderDashboard {
    records: Vec<OrderRecord>,
    settings: Settings,
    filter_service: FilterService,
    report_service: ReportService,
}

impl std::fmt::Debug for OrderDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderDashboard")
            .field("records", &self.records.len())
            .field("bounds", &self.date_bounds())
            .field("settings", &self.settings)
            .finish()
    }
}

impl OrderDashboard {
    /// Build a dashboard over records that are already in memory.
    /// Records are sorted by purchase time.
    pub fn from_records(mut records: Vec<OrderRecord>, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        records.sort_by_key(|r| r.purchased_at);
        Ok(Self::build(records, settings))
    }

    /// Load a dataset from delimited bytes (delimiter taken from `settings`).
    pub fn load_from_bytes(data: &[u8], settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let records = DatasetManager::load_from_bytes(data, settings.delimiter_byte())?;
        Ok(Self::build(records, settings))
    }

    /// Load a dataset file from disk (delimiter taken from `settings`).
    pub fn load_from_file(path: impl AsRef<Path>, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let records = DatasetManager::load_from_file(path, settings.delimiter_byte())?;
        Ok(Self::build(records, settings))
    }

    // ── Dataset ─────────────────────────────────────────────────────

    /// All line items, oldest first.
    #[must_use]
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest purchase date in the dataset.
    #[must_use]
    pub fn date_bounds(&self) -> Option<DateRange> {
        // Records are sorted, so the ends of the vector are the bounds.
        let first = self.records.first()?.purchase_date();
        let last = self.records.last()?.purchase_date();
        DateRange::new(first, last).ok()
    }

    /// `[latest - default_window_days, latest]`, clamped to the dataset.
    pub fn default_range(&self) -> Result<DateRange, CoreError> {
        self.filter_service
            .default_range(&self.records, self.settings.default_window_days)
            .ok_or(CoreError::EmptyDataset)
    }

    /// Clamp a user-chosen range into the dataset bounds.
    pub fn clamp_range(&self, range: &DateRange) -> Result<DateRange, CoreError> {
        let bounds = self.date_bounds().ok_or(CoreError::EmptyDataset)?;
        Ok(range.clamp_to(&bounds))
    }

    /// Line items purchased within `range`.
    #[must_use]
    pub fn records_in_range(&self, range: &DateRange) -> Vec<&OrderRecord> {
        self.filter_service.filter(&self.records, range)
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Recompute every dashboard figure for `range` from the raw records.
    pub fn recompute(&self, range: &DateRange) -> Result<DashboardSnapshot, CoreError> {
        self.report_service.recompute(&self.records, range)
    }

    /// Daily series for `range` only.
    pub fn daily_summary(&self, range: &DateRange) -> Result<Vec<DailySummary>, CoreError> {
        DailyService::new(self.settings.gap_policy).aggregate(self.records_in_range(range))
    }

    /// Category breakdown for `range` only.
    pub fn category_summary(&self, range: &DateRange) -> Result<Vec<CategorySummary>, CoreError> {
        CategoryService::new().aggregate(self.records_in_range(range))
    }

    /// Serialize a snapshot as pretty JSON.
    pub fn snapshot_to_json(snapshot: &DashboardSnapshot) -> Result<String, CoreError> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Services are rebuilt so the change applies to
    /// the next recompute.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        settings.validate()?;
        self.report_service = ReportService::new(&settings);
        self.settings = settings;
        Ok(())
    }

    /// Switch the display currency to a known preset (BRL, USD, EUR).
    pub fn set_currency(&mut self, code: &str) -> Result<(), CoreError> {
        let currency = CurrencyFormat::from_code(code).ok_or_else(|| {
            CoreError::InvalidSettings(format!("Unknown currency code '{code}'"))
        })?;
        self.settings.currency = currency;
        Ok(())
    }

    /// Format an amount in the configured currency.
    #[must_use]
    pub fn format_currency(&self, amount: f64) -> String {
        self.settings.currency.format(amount)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(records: Vec<OrderRecord>, settings: Settings) -> Self {
        let report_service = ReportService::new(&settings);
        Self {
            records,
            settings,
            filter_service: FilterService::new(),
            report_service,
        }
    }
}
