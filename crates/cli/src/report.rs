use std::fmt::{self, Write};

use order_dashboard_core::models::currency::CurrencyFormat;
use order_dashboard_core::models::report::{DashboardSnapshot, RankDirection, RankMetric};
use order_dashboard_core::models::summary::CategorySummary;

pub const TITLE: &str = "Order Business Intelligence Dashboard";

const BAR_WIDTH: usize = 30;

/// Render a snapshot as a plain-text report.
pub fn render_text(
    snapshot: &DashboardSnapshot,
    currency: &CurrencyFormat,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, snapshot, currency)?;
    Ok(out)
}

fn write_report(
    out: &mut impl Write,
    snapshot: &DashboardSnapshot,
    currency: &CurrencyFormat,
) -> fmt::Result {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;
    writeln!(out, "Range: {}", snapshot.range)?;
    writeln!(out)?;

    writeln!(out, "Daily Orders and Sales")?;
    writeln!(out, "  Total Orders: {}", snapshot.totals.total_orders)?;
    writeln!(
        out,
        "  Total Sales:  {}",
        currency.format(snapshot.totals.total_sales)
    )?;
    writeln!(out)?;

    if snapshot.is_empty() {
        return writeln!(out, "No orders in this range.");
    }

    let max_orders = snapshot
        .daily
        .iter()
        .map(|s| s.total_orders)
        .max()
        .unwrap_or(0);
    let max_sales = snapshot
        .daily
        .iter()
        .map(|s| s.total_sales)
        .fold(0.0_f64, f64::max);

    writeln!(
        out,
        "  {:<10}  {:>6}  {:<w$}  {:>16}  {:<w$}",
        "Date",
        "Orders",
        "",
        "Sales",
        "",
        w = BAR_WIDTH
    )?;
    for day in &snapshot.daily {
        writeln!(
            out,
            "  {:<10}  {:>6}  {:<w$}  {:>16}  {}",
            day.date,
            day.total_orders,
            bar(day.total_orders as f64, max_orders as f64),
            currency.format(day.total_sales),
            bar(day.total_sales, max_sales),
            w = BAR_WIDTH
        )?;
    }
    writeln!(out)?;

    for metric in [RankMetric::Orders, RankMetric::Sales] {
        writeln!(out, "Best & Worst Product Performance by {metric}")?;
        for direction in [RankDirection::Top, RankDirection::Bottom] {
            let list = snapshot.rankings.get(metric, direction);
            match direction {
                RankDirection::Top => {
                    writeln!(out, "  Top {} Best Performing Categories", list.len())?
                }
                RankDirection::Bottom => {
                    writeln!(out, "  Bottom {} Worst Performing Categories", list.len())?
                }
            }
            write_ranking(out, list, metric, currency)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_ranking(
    out: &mut impl Write,
    list: &[CategorySummary],
    metric: RankMetric,
    currency: &CurrencyFormat,
) -> fmt::Result {
    let value = |c: &CategorySummary| match metric {
        RankMetric::Orders => c.total_orders as f64,
        RankMetric::Sales => c.total_sales,
    };
    let max = list.iter().map(value).fold(0.0_f64, f64::max);
    let name_width = list
        .iter()
        .map(|c| c.display_label().chars().count())
        .max()
        .unwrap_or(0);

    for (i, category) in list.iter().enumerate() {
        let shown = match metric {
            RankMetric::Orders => category.total_orders.to_string(),
            RankMetric::Sales => currency.format(category.total_sales),
        };
        writeln!(
            out,
            "    {}. {:<name_width$}  {:>16}  {}",
            i + 1,
            category.display_label(),
            shown,
            bar(value(category), max),
        )?;
    }
    Ok(())
}

/// Horizontal bar proportional to `value / max`.
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use order_dashboard_core::models::order::OrderRecord;
    use order_dashboard_core::models::range::DateRange;
    use order_dashboard_core::models::settings::Settings;
    use order_dashboard_core::OrderDashboard;

    fn dashboard() -> OrderDashboard {
        let at = |day: u32, h: u32| {
            NaiveDate::from_ymd_opt(2023, 1, day)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let records = vec![
            OrderRecord::new("1", at(1, 9), 10.0, Some("A".into())),
            OrderRecord::new("1", at(1, 9), 5.0, Some("B".into())),
            OrderRecord::new("2", at(2, 14), 2000.0, Some("A".into())),
        ];
        OrderDashboard::from_records(records, Settings::default()).unwrap()
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(10.0, 10.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0, 10.0), "");
        assert_eq!(bar(1.0, 0.0), "");
    }

    #[test]
    fn tiny_values_still_get_a_bar() {
        assert_eq!(bar(0.001, 1000.0).chars().count(), 1);
    }

    #[test]
    fn text_report_contains_metrics_and_rankings() {
        let dash = dashboard();
        let snapshot = dash.recompute(&dash.date_bounds().unwrap()).unwrap();
        let text = render_text(&snapshot, &dash.settings().currency).unwrap();

        assert!(text.starts_with(TITLE));
        assert!(text.contains("Range: 2023-01-01 ~ 2023-01-02"));
        assert!(text.contains("Total Orders: 2"));
        assert!(text.contains("Total Sales:  R$ 2.015,00"));
        assert!(text.contains("2023-01-02"));
        assert!(text.contains("Best & Worst Product Performance by Total Orders"));
        assert!(text.contains("Best & Worst Product Performance by Total Sales"));
        assert!(text.contains("Top 2 Best Performing Categories"));
        assert!(text.contains("1. A"));
    }

    #[test]
    fn literal_placeholder_category_prints_quoted() {
        let at = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let records = vec![
            OrderRecord::new("1", at, 10.0, None),
            OrderRecord::new("2", at, 10.0, Some("(unknown)".into())),
        ];
        let dash = OrderDashboard::from_records(records, Settings::default()).unwrap();
        let snapshot = dash.recompute(&dash.date_bounds().unwrap()).unwrap();
        let text = render_text(&snapshot, &dash.settings().currency).unwrap();

        assert!(text.contains("1. (unknown) "));
        assert!(text.contains("2. \"(unknown)\""));
    }

    #[test]
    fn empty_range_report() {
        let dash = dashboard();
        let range = DateRange::single_day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let snapshot = dash.recompute(&range).unwrap();
        let text = render_text(&snapshot, &dash.settings().currency).unwrap();
        assert!(text.contains("Total Orders: 0"));
        assert!(text.contains("R$ 0,00"));
        assert!(text.contains("No orders in this range."));
        assert!(!text.contains("Best & Worst"));
    }
}
