use serde::{Deserialize, Serialize};

use crate::models::StationId;

/// One wide-format source row: identifier fields plus the retained day
/// cells, already projected down from whatever extra columns the file
/// carried. Values are null-normalized at parse time (sentinel tokens
/// become `None`), day indexes come from the `D01`..`D31` headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWideRecord {
    pub station: StationId,
    pub magnitude: u16,
    pub year: i32,
    pub month: u32,
    pub days: Vec<(u8, Option<f64>)>,
}

impl RawWideRecord {
    pub fn new(station: StationId, magnitude: u16, year: i32, month: u32) -> Self {
        Self {
            station,
            magnitude,
            year,
            month,
            days: Vec::new(),
        }
    }

    pub fn with_days(mut self, days: Vec<(u8, Option<f64>)>) -> Self {
        self.days = days;
        self
    }
}
