use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical station key. Municipal files carry station codes sometimes as
/// integers and sometimes as zero-padded strings; everything is normalized
/// to one trimmed string form at the boundary so lookups never straddle two
/// key types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StationId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u32> for StationId {
    fn from(code: u32) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One normalized long-form observation: a single daily measurement of one
/// magnitude at one station. The date is always a valid calendar date;
/// combinations like Feb-30 never survive normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub station: StationId,
    pub magnitude: u16,
    pub date: NaiveDate,
    pub value: f64,
}

impl ObservationRecord {
    pub fn new(station: StationId, magnitude: u16, date: NaiveDate, value: f64) -> Self {
        Self {
            station,
            magnitude,
            date,
            value,
        }
    }

    /// Canonical ordering key: (station, magnitude, date) ascending
    pub fn sort_key(&self) -> (&StationId, u16, NaiveDate) {
        (&self.station, self.magnitude, self.date)
    }
}

/// The normalized dataset. Construction enforces the canonical total order,
/// and no mutation is exposed afterwards, so a built dataset can be shared
/// read-only across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionDataset {
    records: Vec<ObservationRecord>,
}

impl EmissionDataset {
    /// Build a dataset from records in any order; the canonical
    /// (station, magnitude, date) sort is applied here.
    pub fn new(mut records: Vec<ObservationRecord>) -> Self {
        records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self { records }
    }

    pub fn empty() -> Self {
        Self { records: Vec::new() }
    }

    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObservationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for EmissionDataset {
    fn default() -> Self {
        Self::empty()
    }
}
