use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for the entire order-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input / Dataset ─────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid input at row {row}, column '{column}': {message}")]
    InvalidField {
        row: u64,
        column: String,
        message: String,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Dataset contains no records")]
    EmptyDataset,

    // ── Date Range ──────────────────────────────────────────────────
    #[error("Reversed date range: start {start} is after end {end}")]
    ReversedRange { start: NaiveDate, end: NaiveDate },

    // ── Settings ────────────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── File I/O / Serialization ────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        // Row-level position is reported by the reader itself; keep the message.
        match e.kind() {
            csv::ErrorKind::Io(_) => CoreError::FileIO(e.to_string()),
            _ => CoreError::InvalidInput(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
