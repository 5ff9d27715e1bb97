use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{RawWideRecord, StationId};
use crate::utils::constants::{
    COL_MAGNITUDE, COL_MONTH, COL_STATION, COL_YEAR, COL_YEAR_ALT, DEFAULT_BUFFER_SIZE,
    FIELD_DELIMITER, NULL_TOKENS,
};

/// Reader for municipal wide-format emission CSV files: semicolon-delimited,
/// decimal comma, identifier columns (station, magnitude, year, month) plus
/// one value column per day of month (`D01`..`D31`).
///
/// A file missing a required identifier column is a fatal schema error.
/// Individual rows with unparsable identifier fields are dropped with a
/// warning; value cells holding a null sentinel become `None`.
pub struct EmissionsReader {
    delimiter: u8,
}

/// Column indexes resolved from a file's header row
struct ColumnLayout {
    station: usize,
    magnitude: usize,
    year: usize,
    month: usize,
    /// (day-of-month, column index) for every retained day column
    days: Vec<(u8, usize)>,
}

impl EmissionsReader {
    pub fn new() -> Self {
        Self {
            delimiter: FIELD_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read all wide records from a file
    pub fn read_file(&self, path: &Path) -> Result<Vec<RawWideRecord>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        self.read_from(reader, path)
    }

    /// Read all wide records from any source; `origin` labels schema errors
    pub fn read_from<R: Read>(&self, reader: R, origin: &Path) -> Result<Vec<RawWideRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let layout = self.resolve_layout(&headers, origin)?;
        debug!(
            path = %origin.display(),
            day_columns = layout.days.len(),
            "resolved emission file layout"
        );

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in csv_reader.records() {
            let row = row?;
            match self.parse_row(&row, &layout) {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(
                path = %origin.display(),
                dropped,
                "dropped rows with unparsable identifier fields"
            );
        }

        Ok(records)
    }

    /// Locate the identifier and day columns; anything else is ignored
    fn resolve_layout(&self, headers: &StringRecord, origin: &Path) -> Result<ColumnLayout> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let required = |name: &str| {
            find(name).ok_or_else(|| ProcessingError::MissingColumn {
                path: PathBuf::from(origin),
                column: name.to_string(),
            })
        };

        let station = required(COL_STATION)?;
        let magnitude = required(COL_MAGNITUDE)?;
        let year = find(COL_YEAR)
            .or_else(|| find(COL_YEAR_ALT))
            .ok_or_else(|| ProcessingError::MissingColumn {
                path: PathBuf::from(origin),
                column: COL_YEAR.to_string(),
            })?;
        let month = required(COL_MONTH)?;

        let days = headers
            .iter()
            .enumerate()
            .filter_map(|(index, header)| parse_day_header(header.trim()).map(|day| (day, index)))
            .collect();

        Ok(ColumnLayout {
            station,
            magnitude,
            year,
            month,
            days,
        })
    }

    /// Parse one data row; `None` drops the row (recoverable)
    fn parse_row(&self, row: &StringRecord, layout: &ColumnLayout) -> Option<RawWideRecord> {
        let station = StationId::new(row.get(layout.station)?);
        if station.as_str().is_empty() {
            return None;
        }
        let magnitude = row.get(layout.magnitude)?.parse::<u16>().ok()?;
        let year = row.get(layout.year)?.parse::<i32>().ok()?;
        let month = row.get(layout.month)?.parse::<u32>().ok()?;

        let days = layout
            .days
            .iter()
            .map(|&(day, index)| (day, parse_value(row.get(index).unwrap_or(""))))
            .collect();

        Some(RawWideRecord::new(station, magnitude, year, month).with_days(days))
    }
}

impl Default for EmissionsReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a `D01`..`D31` day header, returning the day-of-month
fn parse_day_header(header: &str) -> Option<u8> {
    let digits = header.strip_prefix('D')?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u8 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// Parse a value cell: null sentinels become `None`, decimal commas are
/// normalized, anything else unparsable degrades to `None`
fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if NULL_TOKENS.contains(&cell) {
        return None;
    }
    cell.replace(',', ".").parse::<f64>().ok()
}
