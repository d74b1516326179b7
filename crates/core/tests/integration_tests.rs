use chrono::NaiveDate;
use std::io::Write;

use order_dashboard_core::errors::CoreError;
use order_dashboard_core::models::order::OrderRecord;
use order_dashboard_core::models::range::DateRange;
use order_dashboard_core::models::report::DashboardSnapshot;
use order_dashboard_core::models::settings::{GapPolicy, Settings};
use order_dashboard_core::OrderDashboard;

// ═══════════════════════════════════════════════════════════════════
// Fixture: a small slice of a marketplace export
// ═══════════════════════════════════════════════════════════════════

const DATASET: &str = "\
order_id,customer_id,order_purchase_timestamp,price,freight_value,product_category_name
e481f51c,9ef432eb,2017-10-02 10:56:33,29.99,8.72,utilidades_domesticas
53cdb2fc,b0830fb4,2017-10-05 20:41:37,118.70,22.76,perfumaria
47770eb9,41ce2a54,2017-10-08 08:38:49,159.90,19.22,automotivo
949d5b44,f8819709,2017-10-08 19:28:06,45.00,27.20,pet_shop
949d5b44,f8819709,2017-10-08 19:28:06,45.00,27.20,pet_shop
ad21c59c,8ab97904,2017-10-10 21:18:33,19.90,8.72,papelaria
a4591c26,503740e9,2017-10-12 14:10:13,147.90,27.36,automotivo
136cce7f,ed0271e0,2017-10-12 09:56:11,49.90,16.05,
6514b8ad,9bdf08b4,2017-10-15 18:00:00,99.00,15.00,Perfumaria
";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dashboard() -> OrderDashboard {
    OrderDashboard::load_from_bytes(DATASET.as_bytes(), Settings::default()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════

#[test]
fn load_from_bytes_reads_all_rows_sorted() {
    let dash = dashboard();
    assert_eq!(dash.record_count(), 9);
    assert!(!dash.is_empty());
    let records = dash.records();
    assert!(records.windows(2).all(|w| w[0].purchased_at <= w[1].purchased_at));
    // 09:56 sorts before 14:10 on the same day
    assert_eq!(records[6].order_id, "136cce7f");
}

#[test]
fn load_from_file_with_semicolon_delimiter() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", DATASET.replace(',', ";")).unwrap();
    file.flush().unwrap();

    let settings = Settings {
        delimiter: ';',
        ..Settings::default()
    };
    let dash = OrderDashboard::load_from_file(file.path(), settings).unwrap();
    assert_eq!(dash.record_count(), 9);
}

#[test]
fn load_rejects_invalid_settings() {
    let settings = Settings {
        top_n: 0,
        ..Settings::default()
    };
    let err = OrderDashboard::load_from_bytes(DATASET.as_bytes(), settings).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettings(_)));
}

#[test]
fn oversized_window_is_rejected_before_any_range_is_computed() {
    let settings = Settings {
        default_window_days: i64::MAX,
        ..Settings::default()
    };
    let err = OrderDashboard::from_records(Vec::new(), settings.clone()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettings(_)));

    let mut dash = dashboard();
    assert!(dash.set_settings(settings).is_err());
    assert_eq!(dash.default_range().unwrap().end(), d(2017, 10, 15));
}

#[test]
fn load_rejects_unparseable_timestamp() {
    let data = "order_id,order_purchase_timestamp,price,product_category_name\no1,soon,1.0,x\n";
    let err = OrderDashboard::load_from_bytes(data.as_bytes(), Settings::default()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidField { row: 2, .. }));
}

#[test]
fn from_records_sorts_input() {
    let late = OrderRecord::new("b", d(2020, 1, 2).and_hms_opt(0, 0, 0).unwrap(), 1.0, None);
    let early = OrderRecord::new("a", d(2020, 1, 1).and_hms_opt(0, 0, 0).unwrap(), 1.0, None);
    let dash = OrderDashboard::from_records(vec![late, early], Settings::default()).unwrap();
    assert_eq!(dash.records()[0].order_id, "a");
}

// ═══════════════════════════════════════════════════════════════════
// Ranges
// ═══════════════════════════════════════════════════════════════════

#[test]
fn date_bounds_cover_dataset() {
    let bounds = dashboard().date_bounds().unwrap();
    assert_eq!(bounds, DateRange::new(d(2017, 10, 2), d(2017, 10, 15)).unwrap());
}

#[test]
fn default_range_is_ten_days_back_from_latest() {
    let range = dashboard().default_range().unwrap();
    assert_eq!(range, DateRange::new(d(2017, 10, 5), d(2017, 10, 15)).unwrap());
}

#[test]
fn empty_dataset_has_no_default_range() {
    let dash = OrderDashboard::from_records(Vec::new(), Settings::default()).unwrap();
    assert!(dash.date_bounds().is_none());
    assert!(matches!(dash.default_range(), Err(CoreError::EmptyDataset)));
    let any = DateRange::single_day(d(2020, 1, 1));
    assert!(matches!(dash.clamp_range(&any), Err(CoreError::EmptyDataset)));
}

#[test]
fn clamp_range_into_bounds() {
    let dash = dashboard();
    let wide = DateRange::new(d(2017, 1, 1), d(2018, 1, 1)).unwrap();
    assert_eq!(dash.clamp_range(&wide).unwrap(), dash.date_bounds().unwrap());
}

#[test]
fn records_in_range_inclusive() {
    let dash = dashboard();
    let range = DateRange::new(d(2017, 10, 8), d(2017, 10, 10)).unwrap();
    assert_eq!(dash.records_in_range(&range).len(), 4);
}

// ═══════════════════════════════════════════════════════════════════
// Recompute
// ═══════════════════════════════════════════════════════════════════

#[test]
fn recompute_full_range() {
    let dash = dashboard();
    let snapshot = dash.recompute(&dash.date_bounds().unwrap()).unwrap();

    // 14 calendar days, zero-filled
    assert_eq!(snapshot.daily.len(), 14);
    assert_eq!(snapshot.totals.active_days, 6);
    assert_eq!(snapshot.totals.line_items, 9);
    assert_eq!(snapshot.totals.total_orders, 8);
    assert_eq!(snapshot.totals.distinct_orders, 8);
    assert!((snapshot.totals.total_sales - 715.29).abs() < 1e-9);

    let oct8 = snapshot.daily.iter().find(|s| s.date == d(2017, 10, 8)).unwrap();
    assert_eq!(oct8.total_orders, 2);
    assert!((oct8.total_sales - 249.90).abs() < 1e-9);
}

#[test]
fn recompute_categories_keep_case_and_missing_bucket() {
    let dash = dashboard();
    let snapshot = dash.recompute(&dash.date_bounds().unwrap()).unwrap();
    let labels: Vec<&str> = snapshot.categories.iter().map(|c| c.label()).collect();
    assert!(labels.contains(&"perfumaria"));
    assert!(labels.contains(&"Perfumaria"));
    assert!(labels.contains(&"(unknown)"));
    assert_eq!(snapshot.categories.len(), 7);

    let pet = snapshot
        .categories
        .iter()
        .find(|c| c.label() == "pet_shop")
        .unwrap();
    assert_eq!(pet.total_orders, 1);
    assert_eq!(pet.total_sales, 90.0);
}

#[test]
fn recompute_rankings() {
    let dash = dashboard();
    let snapshot = dash.recompute(&dash.date_bounds().unwrap()).unwrap();
    assert_eq!(snapshot.rankings.top_by_orders[0].label(), "automotivo");
    assert_eq!(snapshot.rankings.top_by_sales[0].label(), "automotivo");
    assert_eq!(snapshot.rankings.bottom_by_sales[0].label(), "papelaria");
    assert_eq!(snapshot.rankings.top_by_orders.len(), 5);
}

#[test]
fn recompute_empty_window_is_not_an_error() {
    let dash = dashboard();
    let quiet = DateRange::new(d(2017, 10, 13), d(2017, 10, 14)).unwrap();
    let snapshot = dash.recompute(&quiet).unwrap();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.totals.total_sales, 0.0);
    assert_eq!(dash.format_currency(snapshot.totals.total_sales), "R$ 0,00");
}

#[test]
fn daily_and_category_summaries_agree_on_revenue() {
    let dash = dashboard();
    let range = dash.default_range().unwrap();
    let daily: f64 = dash.daily_summary(&range).unwrap().iter().map(|s| s.total_sales).sum();
    let by_category: f64 = dash
        .category_summary(&range)
        .unwrap()
        .iter()
        .map(|c| c.total_sales)
        .sum();
    assert!((daily - by_category).abs() < 1e-9);
}

#[test]
fn snapshot_serializes_to_json() {
    let dash = dashboard();
    let snapshot = dash.recompute(&dash.default_range().unwrap()).unwrap();
    let json = OrderDashboard::snapshot_to_json(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["range"]["start"], "2017-10-05");
    assert!(value["daily"].is_array());
    assert!(value["totals"]["total_sales"].is_number());
}

#[test]
fn snapshot_json_with_reversed_range_does_not_deserialize() {
    let dash = dashboard();
    let snapshot = dash.recompute(&dash.default_range().unwrap()).unwrap();
    let mut value: serde_json::Value =
        serde_json::from_str(&OrderDashboard::snapshot_to_json(&snapshot).unwrap()).unwrap();
    value["range"]["start"] = serde_json::Value::from("2017-10-20");
    assert!(serde_json::from_value::<DashboardSnapshot>(value).is_err());
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

#[test]
fn set_settings_changes_next_recompute() {
    let mut dash = dashboard();
    let range = dash.date_bounds().unwrap();
    let settings = Settings {
        gap_policy: GapPolicy::Sparse,
        top_n: 2,
        ..Settings::default()
    };
    dash.set_settings(settings).unwrap();
    let snapshot = dash.recompute(&range).unwrap();
    assert_eq!(snapshot.daily.len(), 6);
    assert_eq!(snapshot.rankings.bottom_by_orders.len(), 2);
}

#[test]
fn set_settings_rejects_invalid_and_keeps_old() {
    let mut dash = dashboard();
    let bad = Settings {
        default_window_days: -5,
        ..Settings::default()
    };
    assert!(dash.set_settings(bad).is_err());
    assert_eq!(dash.settings(), &Settings::default());
}

#[test]
fn set_currency_preset() {
    let mut dash = dashboard();
    dash.set_currency("usd").unwrap();
    assert_eq!(dash.format_currency(1234.5), "$ 1,234.50");
    assert!(matches!(dash.set_currency("zzz"), Err(CoreError::InvalidSettings(_))));
}

#[test]
fn debug_output_summarises() {
    let dbg = format!("{:?}", dashboard());
    assert!(dbg.contains("OrderDashboard"));
    assert!(dbg.contains("records: 9"));
}
