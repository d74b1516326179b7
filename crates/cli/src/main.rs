//! Order dashboard CLI
//!
//! Usage:
//!   order-dashboard report [--start DATE] [--end DATE] [--format text|json]
//!   order-dashboard dashboard [--start DATE] [--end DATE]

mod config;
mod report;
mod tui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use order_dashboard_core::models::range::DateRange;
use order_dashboard_core::OrderDashboard;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::SettingsOverrides;

#[derive(Parser)]
#[command(name = "order-dashboard", version)]
#[command(about = "Daily orders, sales and category rankings from an order export")]
struct Cli {
    /// Order line item CSV export
    #[arg(long, short, global = true, default_value = "order_products.csv")]
    input: PathBuf,

    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: SettingsOverrides,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard figures for one date range
    Report {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Interactive terminal dashboard
    Dashboard {
        /// Initial first day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Initial last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Commands::Dashboard { .. });
    init_logging(&cli.log_level, cli.log_file.as_deref(), interactive)?;

    let settings = config::resolve_settings(cli.config.as_deref(), &cli.overrides)?;
    let dashboard = OrderDashboard::load_from_file(&cli.input, settings)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    info!(records = dashboard.record_count(), "dataset ready");

    match cli.command {
        Commands::Report { start, end, format } => {
            let range = resolve_range(&dashboard, start, end)?;
            let snapshot = dashboard.recompute(&range)?;
            match format {
                OutputFormat::Text => {
                    print!("{}", report::render_text(&snapshot, &dashboard.settings().currency)?)
                }
                OutputFormat::Json => println!("{}", OrderDashboard::snapshot_to_json(&snapshot)?),
            }
        }
        Commands::Dashboard { start, end } => {
            let range = resolve_range(&dashboard, start, end)?;
            let app = tui::App::new(dashboard, range)?;
            tui::run_dashboard(app)?;
        }
    }

    Ok(())
}

/// Stderr logging by default, a plain log file with `--log-file`.
/// The terminal dashboard logs nowhere unless a file is given.
fn init_logging(level: &str, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }
    Ok(())
}

/// Default range with any explicit ends swapped in, clamped to the dataset.
fn resolve_range(
    dashboard: &OrderDashboard,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange> {
    let default = dashboard.default_range()?;
    let requested = DateRange::new(
        start.unwrap_or(default.start()),
        end.unwrap_or(default.end()),
    )
    .context("invalid --start/--end")?;

    let range = dashboard.clamp_range(&requested)?;
    if range != requested {
        warn!(%requested, %range, "range clamped to dataset bounds");
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use order_dashboard_core::models::order::OrderRecord;
    use order_dashboard_core::models::settings::Settings;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 8, day).unwrap()
    }

    fn dashboard() -> OrderDashboard {
        let records = [3, 9, 25]
            .iter()
            .map(|&day| OrderRecord::new(format!("o{day}"), d(day).and_hms_opt(8, 0, 0).unwrap(), 1.0, None))
            .collect();
        OrderDashboard::from_records(records, Settings::default()).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_arguments() {
        let cli = Cli::try_parse_from([
            "order-dashboard",
            "report",
            "--start",
            "2022-08-01",
            "--format",
            "json",
            "--top-n",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("order_products.csv"));
        assert_eq!(cli.overrides.top_n, Some(3));
        match cli.command {
            Commands::Report { start, end, format } => {
                assert_eq!(start, Some(d(1)));
                assert_eq!(end, None);
                assert_eq!(format, OutputFormat::Json);
            }
            Commands::Dashboard { .. } => panic!("expected report"),
        }
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["order-dashboard", "report", "--start", "08/01/2022"]).is_err());
    }

    #[test]
    fn range_defaults_to_window() {
        let range = resolve_range(&dashboard(), None, None).unwrap();
        assert_eq!(range, DateRange::new(d(15), d(25)).unwrap());
    }

    #[test]
    fn explicit_ends_are_clamped() {
        let range = resolve_range(&dashboard(), Some(d(1)), Some(d(31))).unwrap();
        assert_eq!(range, DateRange::new(d(3), d(25)).unwrap());
    }

    #[test]
    fn reversed_range_is_an_error() {
        let err = resolve_range(&dashboard(), Some(d(20)), Some(d(10))).unwrap_err();
        assert!(format!("{err:#}").contains("Reversed date range"));
    }
}
