use serde::{Deserialize, Serialize};

use super::currency::CurrencyFormat;
use crate::errors::CoreError;

/// Default look-back window (days before the latest purchase).
pub const DEFAULT_WINDOW_DAYS: i64 = 10;

/// Longest accepted look-back window (about a century).
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Default length of each top/bottom category list.
pub const DEFAULT_TOP_N: usize = 5;

/// Whether calendar days without purchases show up in the daily series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Every day between the first and last observed day appears; gaps are zero.
    #[default]
    ZeroFill,
    /// Only days with at least one line item appear.
    Sparse,
}

/// User-configurable settings, read from an optional JSON file.
///
/// Every field has a default, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency used for sales figures
    pub currency: CurrencyFormat,

    /// Days before the latest purchase covered by the default range
    pub default_window_days: i64,

    /// Length of each top/bottom category ranking
    pub top_n: usize,

    /// Zero-fill policy for the daily series
    pub gap_policy: GapPolicy,

    /// Field delimiter of the input file
    pub delimiter: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            default_window_days: DEFAULT_WINDOW_DAYS,
            top_n: DEFAULT_TOP_N,
            gap_policy: GapPolicy::default(),
            delimiter: ',',
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0..=MAX_WINDOW_DAYS).contains(&self.default_window_days) {
            return Err(CoreError::InvalidSettings(format!(
                "default_window_days must be between 0 and {MAX_WINDOW_DAYS} (got {})",
                self.default_window_days
            )));
        }
        if self.top_n == 0 {
            return Err(CoreError::InvalidSettings(
                "top_n must be at least 1".to_string(),
            ));
        }
        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            return Err(CoreError::InvalidSettings(format!(
                "delimiter {:?} must be a single ASCII character other than a quote or newline",
                self.delimiter
            )));
        }
        if self.currency.symbol.trim().is_empty() {
            return Err(CoreError::InvalidSettings(
                "currency symbol must not be empty".to_string(),
            ));
        }
        if self.currency.thousands_separator == self.currency.decimal_separator {
            return Err(CoreError::InvalidSettings(
                "currency thousands and decimal separators must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }
}
