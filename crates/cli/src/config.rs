use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use order_dashboard_core::models::currency::CurrencyFormat;
use order_dashboard_core::models::settings::{GapPolicy, Settings};
use tracing::debug;

/// Command-line overrides applied on top of the settings file.
#[derive(Debug, Default, Clone, Args)]
pub struct SettingsOverrides {
    /// Currency preset for sales figures (BRL, USD, EUR)
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Days before the latest purchase covered by the default range
    #[arg(long, global = true)]
    pub window_days: Option<i64>,

    /// Length of each top/bottom category list
    #[arg(long, global = true)]
    pub top_n: Option<usize>,

    /// Whether days without orders appear in the daily series
    #[arg(long, global = true, value_enum)]
    pub gaps: Option<GapArg>,

    /// Field delimiter of the input file
    #[arg(long, global = true)]
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GapArg {
    /// Show every day between the first and last purchase
    ZeroFill,
    /// Show only days with purchases
    Sparse,
}

impl From<GapArg> for GapPolicy {
    fn from(arg: GapArg) -> Self {
        match arg {
            GapArg::ZeroFill => GapPolicy::ZeroFill,
            GapArg::Sparse => GapPolicy::Sparse,
        }
    }
}

/// Settings from `config` (if given), then CLI overrides, then validation.
pub fn resolve_settings(config: Option<&Path>, overrides: &SettingsOverrides) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            let settings = Settings::from_json(&json)
                .with_context(|| format!("invalid settings file {}", path.display()))?;
            debug!(path = %path.display(), "loaded settings file");
            settings
        }
        None => Settings::default(),
    };

    apply_overrides(&mut settings, overrides)?;
    settings.validate()?;
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, overrides: &SettingsOverrides) -> Result<()> {
    if let Some(code) = &overrides.currency {
        settings.currency = match CurrencyFormat::from_code(code) {
            Some(currency) => currency,
            None => bail!("unknown currency '{code}' (expected BRL, USD or EUR)"),
        };
    }
    if let Some(days) = overrides.window_days {
        settings.default_window_days = days;
    }
    if let Some(n) = overrides.top_n {
        settings.top_n = n;
    }
    if let Some(gaps) = overrides.gaps {
        settings.gap_policy = gaps.into();
    }
    if let Some(delimiter) = overrides.delimiter {
        settings.delimiter = delimiter;
    }
    Ok(())
}
