use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use order_dashboard_core::models::report::{RankDirection, RankMetric};
use order_dashboard_core::models::summary::CategorySummary;

use super::app::App;
use crate::report::TITLE;

/// Top-level layout: header, metrics, daily charts, rankings, footer.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),       // header
            Constraint::Length(4),       // metrics
            Constraint::Percentage(50),  // daily charts
            Constraint::Min(7),          // rankings
            Constraint::Length(3),       // footer
        ])
        .split(f.area());

    // Header
    let header = Paragraph::new(format!(
        "{TITLE}   |   Range: {}   |   Data: {}",
        app.range, app.bounds
    ))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_metrics(f, chunks[1], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_daily_chart(f, charts[0], app, RankMetric::Orders);
    draw_daily_chart(f, charts[1], app, RankMetric::Sales);

    let rankings = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    draw_ranking(f, rankings[0], app, RankDirection::Top);
    draw_ranking(f, rankings[1], app, RankDirection::Bottom);

    // Footer
    let footer_text = match &app.status {
        Some(status) => Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(
            "[ ]: start  |  { }: end  |  ←/→: shift  |  PgUp/PgDn: page  |  r: reset  |  Tab: orders/sales  |  q: quit",
        ),
    };
    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[4]);
}

fn draw_metrics(f: &mut Frame<'_>, area: Rect, app: &App) {
    let totals = &app.snapshot.totals;
    let currency = app.currency();

    let text = vec![
        Line::from(vec![
            Span::styled("Total Orders: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(totals.total_orders.to_string()),
            Span::raw("     "),
            Span::styled("Total Sales: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(currency.format(totals.total_sales)),
        ]),
        Line::from(format!(
            "Distinct orders: {}   Line items: {}   Active days: {}   Records loaded: {}",
            totals.distinct_orders,
            totals.line_items,
            totals.active_days,
            app.record_count()
        )),
    ];

    let block = Block::default()
        .title(Span::raw("Daily Orders and Sales"))
        .borders(Borders::ALL);
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_daily_chart(f: &mut Frame<'_>, area: Rect, app: &App, metric: RankMetric) {
    let daily = &app.snapshot.daily;
    let currency = app.currency();

    let points: Vec<(f64, f64)> = daily
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let y = match metric {
                RankMetric::Orders => day.total_orders as f64,
                RankMetric::Sales => day.total_sales,
            };
            (i as f64, y)
        })
        .collect();

    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);
    let y_max = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max).max(1.0) * 1.1;

    let x_labels: Vec<String> = match (daily.first(), daily.last()) {
        (Some(first), Some(last)) if daily.len() > 2 => vec![
            first.date.format("%m-%d").to_string(),
            daily[daily.len() / 2].date.format("%m-%d").to_string(),
            last.date.format("%m-%d").to_string(),
        ],
        (Some(first), Some(last)) => vec![
            first.date.format("%m-%d").to_string(),
            last.date.format("%m-%d").to_string(),
        ],
        _ => Vec::new(),
    };
    let y_labels: Vec<String> = match metric {
        RankMetric::Orders => vec!["0".to_string(), format!("{:.0}", y_max)],
        RankMetric::Sales => vec![currency.format(0.0), currency.format(y_max)],
    };

    let (title, color) = match metric {
        RankMetric::Orders => ("Orders per day", Color::Cyan),
        RankMetric::Sales => ("Sales per day", Color::Green),
    };

    let dataset = Dataset::default()
        .name(metric.to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels))
        .y_axis(Axis::default().bounds([0.0, y_max]).labels(y_labels));

    f.render_widget(chart, area);
}

fn draw_ranking(f: &mut Frame<'_>, area: Rect, app: &App, direction: RankDirection) {
    let metric = app.ranking_metric;
    let list = app.snapshot.rankings.get(metric, direction);
    let currency = app.currency();

    let title = match direction {
        RankDirection::Top => format!("Top {} Best Performing Categories by {metric}", list.len()),
        RankDirection::Bottom => {
            format!("Bottom {} Worst Performing Categories by {metric}", list.len())
        }
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    if list.is_empty() {
        f.render_widget(Paragraph::new("No orders in this range.").block(block), area);
        return;
    }

    let bars: Vec<Bar> = list
        .iter()
        .map(|category| {
            let (value, text) = bar_value(category, metric, |v| currency.format(v));
            Bar::default()
                .value(value)
                .label(Line::from(category.display_label().into_owned()))
                .text_value(text)
        })
        .collect();

    let color = match direction {
        RankDirection::Top => Color::Green,
        RankDirection::Bottom => Color::Red,
    };

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().add_modifier(Modifier::BOLD))
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

/// Bar length and label for one category. Sales bars are measured in cents.
fn bar_value(
    category: &CategorySummary,
    metric: RankMetric,
    format_sales: impl Fn(f64) -> String,
) -> (u64, String) {
    match metric {
        RankMetric::Orders => (
            category.total_orders as u64,
            category.total_orders.to_string(),
        ),
        RankMetric::Sales => (
            (category.total_sales * 100.0).round().max(0.0) as u64,
            format_sales(category.total_sales),
        ),
    }
}
