use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::models::StationId;
use crate::utils::constants::UNKNOWN_DISTRICT;

/// Caller-supplied mapping from station to district label. Stations absent
/// from the map resolve to the shared "unknown" bucket so district
/// summaries never silently drop data.
#[derive(Debug, Clone, Default)]
pub struct StationDistrictMap {
    districts: HashMap<StationId, String>,
}

impl StationDistrictMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON object of `{"station_code": "district", ...}`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let raw: HashMap<String, String> = serde_json::from_reader(reader)?;
        Ok(Self::from_iter(raw))
    }

    pub fn insert(&mut self, station: StationId, district: &str) {
        self.districts.insert(station, district.to_string());
    }

    pub fn district_for(&self, station: &StationId) -> &str {
        self.districts
            .get(station)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DISTRICT)
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, S)> for StationDistrictMap {
    fn from_iter<T: IntoIterator<Item = (S, S)>>(iter: T) -> Self {
        let districts = iter
            .into_iter()
            .map(|(station, district)| (StationId::new(&station.into()), district.into()))
            .collect();
        Self { districts }
    }
}
