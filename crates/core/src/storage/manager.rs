use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::order::OrderRecord;

use super::format;

/// Loads order datasets from delimited text.
pub struct DatasetManager;

impl DatasetManager {
    /// Parse every row of a delimited stream into [`OrderRecord`]s.
    ///
    /// Flow: header row → column layout → typed rows → sort by purchase time.
    /// The first bad row aborts the load; there is no best-effort parse.
    pub fn load_from_reader<R: Read>(
        reader: R,
        delimiter: u8,
    ) -> Result<Vec<OrderRecord>, CoreError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        // 1. Locate required columns
        let headers = csv_reader.headers()?.clone();
        let layout = format::read_layout(&headers)?;

        // 2. Parse rows
        let mut records = Vec::new();
        let mut row = csv::StringRecord::new();
        let mut line = 1u64;
        while csv_reader.read_record(&mut row)? {
            line = row.position().map(|p| p.line()).unwrap_or(line + 1);
            match format::parse_row(&layout, &row, line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(line, error = %e, "rejecting dataset");
                    return Err(e);
                }
            }
        }

        // 3. Chronological order (stable, so same-instant rows keep file order)
        records.sort_by_key(|r| r.purchased_at);

        Ok(records)
    }

    /// Parse a dataset held in memory.
    pub fn load_from_bytes(data: &[u8], delimiter: u8) -> Result<Vec<OrderRecord>, CoreError> {
        Self::load_from_reader(data, delimiter)
    }

    /// Read and parse a dataset file.
    pub fn load_from_file(
        path: impl AsRef<Path>,
        delimiter: u8,
    ) -> Result<Vec<OrderRecord>, CoreError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| CoreError::FileIO(format!("{}: {e}", path.display())))?;
        let records = Self::load_from_reader(std::io::BufReader::new(file), delimiter)?;
        info!(path = %path.display(), records = records.len(), "loaded dataset");
        Ok(records)
    }
}
