use serde::{Deserialize, Serialize};

/// How monetary totals are rendered.
///
/// Defaults to Brazilian real with pt-BR separators (`R$ 1.234,56`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// ISO 4217 code, e.g. "BRL"
    pub code: String,

    /// Prefix symbol, e.g. "R$"
    pub symbol: String,

    /// Digit group separator
    pub thousands_separator: char,

    /// Separator between integer and fractional part
    pub decimal_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

impl CurrencyFormat {
    pub fn brl() -> Self {
        Self {
            code: "BRL".to_string(),
            symbol: "R$".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }

    pub fn usd() -> Self {
        Self {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            thousands_separator: ',',
            decimal_separator: '.',
        }
    }

    pub fn eur() -> Self {
        Self {
            code: "EUR".to_string(),
            symbol: "€".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }

    /// Look up a preset by currency code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "BRL" => Some(Self::brl()),
            "USD" => Some(Self::usd()),
            "EUR" => Some(Self::eur()),
            _ => None,
        }
    }

    /// Format an amount with two decimals, grouped thousands and the symbol.
    ///
    /// `1234.5` → `R$ 1.234,50`, `-3.0` → `-R$ 3,00`.
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.2}", amount.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        // "-0,00" is never useful
        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!(
            "{sign}{} {grouped}{}{frac_part}",
            self.symbol, self.decimal_separator
        )
    }
}
