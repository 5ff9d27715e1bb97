use std::path::PathBuf;

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{EmissionDataset, ObservationRecord, RawWideRecord};
use crate::readers::EmissionsReader;
use crate::utils::progress::ProgressReporter;

/// Build a calendar date from its parts, or `None` when the combination is
/// not a real date (Feb-30, Apr-31, Feb-29 off leap years). Invalid
/// combinations drive silent row filtering, not error propagation.
pub fn try_build_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Turns wide source rows into the normalized long-form dataset.
///
/// Each retained day cell becomes one candidate observation; cells with a
/// missing value and cells whose (year, month, day) is not a valid calendar
/// date are dropped. The surviving records are sorted into the canonical
/// (station, magnitude, date) order by `EmissionDataset::new`.
pub struct Normalizer {
    reader: EmissionsReader,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            reader: EmissionsReader::new(),
        }
    }

    pub fn with_reader(reader: EmissionsReader) -> Self {
        Self { reader }
    }

    /// Reshape already-parsed wide records into the normalized dataset
    pub fn normalize(&self, raw: Vec<RawWideRecord>) -> EmissionDataset {
        let mut records = Vec::new();
        let mut dropped_dates = 0usize;

        for row in raw {
            for (day, value) in &row.days {
                // Missing values are dropped before date construction
                let Some(value) = value else { continue };

                match try_build_date(row.year, row.month, u32::from(*day)) {
                    Some(date) => records.push(ObservationRecord::new(
                        row.station.clone(),
                        row.magnitude,
                        date,
                        *value,
                    )),
                    None => dropped_dates += 1,
                }
            }
        }

        if dropped_dates > 0 {
            debug!(dropped_dates, "filtered observations with invalid calendar dates");
        }

        EmissionDataset::new(records)
    }

    /// Load and normalize a set of yearly files. Files are read in
    /// parallel; the final canonical sort restores a deterministic total
    /// order regardless of read completion order.
    pub fn load_files(
        &self,
        paths: &[PathBuf],
        progress: Option<&ProgressReporter>,
    ) -> Result<EmissionDataset> {
        let per_file: Vec<Vec<RawWideRecord>> = paths
            .par_iter()
            .map(|path| {
                let records = self.reader.read_file(path)?;
                if let Some(progress) = progress {
                    progress.increment(1);
                }
                Ok(records)
            })
            .collect::<Result<_>>()?;

        let raw: Vec<RawWideRecord> = per_file.into_iter().flatten().collect();
        info!(files = paths.len(), wide_rows = raw.len(), "loaded emission sources");

        let dataset = self.normalize(raw);
        info!(observations = dataset.len(), "normalized dataset built");
        Ok(dataset)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
