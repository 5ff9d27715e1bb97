use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::analyzers::DescriptiveStats;
use crate::models::{EmissionDataset, ObservationRecord, StationDistrictMap, StationId};

/// Monthly mean values indexed by month - 1; months with no observations
/// stay `None`, never zero.
pub type MonthlyMeans = [Option<f64>; 12];

/// Query layer over a normalized dataset. Every operation is a pure read,
/// total over any dataset including the empty one; unknown station or
/// magnitude filters yield empty results rather than errors.
pub struct EmissionsAnalyzer;

impl EmissionsAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Distinct stations and magnitudes, each sorted ascending
    pub fn stations_and_magnitudes(
        &self,
        dataset: &EmissionDataset,
    ) -> (Vec<StationId>, Vec<u16>) {
        let mut stations: Vec<StationId> =
            dataset.iter().map(|r| r.station.clone()).collect();
        stations.sort();
        stations.dedup();

        let mut magnitudes: Vec<u16> = dataset.iter().map(|r| r.magnitude).collect();
        magnitudes.sort_unstable();
        magnitudes.dedup();

        (stations, magnitudes)
    }

    /// Observation series for one (station, magnitude) pair within an
    /// inclusive date range, in ascending date order. An inverted range
    /// yields an empty series.
    pub fn range_series(
        &self,
        dataset: &EmissionDataset,
        station: &StationId,
        magnitude: u16,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(NaiveDate, f64)> {
        dataset
            .iter()
            .filter(|r| {
                r.station == *station
                    && r.magnitude == magnitude
                    && r.date >= start
                    && r.date <= end
            })
            .map(|r| (r.date, r.value))
            .collect()
    }

    /// Descriptive summary per magnitude over the whole dataset
    pub fn summary_overall(
        &self,
        dataset: &EmissionDataset,
    ) -> BTreeMap<u16, DescriptiveStats> {
        self.grouped_stats(dataset, |r| r.magnitude)
    }

    /// Descriptive summary per (station, magnitude) pair
    pub fn summary_by_station(
        &self,
        dataset: &EmissionDataset,
    ) -> BTreeMap<(StationId, u16), DescriptiveStats> {
        self.grouped_stats(dataset, |r| (r.station.clone(), r.magnitude))
    }

    /// Descriptive summary per (district, magnitude); stations absent from
    /// the supplied map land in the "unknown" district bucket instead of
    /// being dropped
    pub fn summary_by_district(
        &self,
        dataset: &EmissionDataset,
        districts: &StationDistrictMap,
    ) -> BTreeMap<(String, u16), DescriptiveStats> {
        self.grouped_stats(dataset, |r| {
            (districts.district_for(&r.station).to_string(), r.magnitude)
        })
    }

    /// Descriptive summary for one (station, magnitude) pair; `None` when
    /// the pair has no observations
    pub fn summary_for_station_magnitude(
        &self,
        dataset: &EmissionDataset,
        station: &StationId,
        magnitude: u16,
    ) -> Option<DescriptiveStats> {
        let values: Vec<f64> = dataset
            .iter()
            .filter(|r| r.station == *station && r.magnitude == magnitude)
            .map(|r| r.value)
            .collect();
        DescriptiveStats::from_sample(&values)
    }

    /// Monthly mean table for one magnitude in one year: station rows,
    /// twelve month columns
    pub fn monthly_means_for_magnitude_year(
        &self,
        dataset: &EmissionDataset,
        magnitude: u16,
        year: i32,
    ) -> BTreeMap<StationId, MonthlyMeans> {
        self.monthly_means(
            dataset
                .iter()
                .filter(|r| r.magnitude == magnitude && r.date.year() == year),
            |r| r.station.clone(),
        )
    }

    /// Monthly mean table for one station: magnitude rows, twelve month
    /// columns
    pub fn monthly_means_for_station(
        &self,
        dataset: &EmissionDataset,
        station: &StationId,
    ) -> BTreeMap<u16, MonthlyMeans> {
        self.monthly_means(
            dataset.iter().filter(|r| r.station == *station),
            |r| r.magnitude,
        )
    }

    fn grouped_stats<K: Ord>(
        &self,
        dataset: &EmissionDataset,
        key: impl Fn(&ObservationRecord) -> K,
    ) -> BTreeMap<K, DescriptiveStats> {
        let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
        for record in dataset.iter() {
            groups.entry(key(record)).or_default().push(record.value);
        }

        groups
            .into_iter()
            .filter_map(|(key, values)| {
                DescriptiveStats::from_sample(&values).map(|stats| (key, stats))
            })
            .collect()
    }

    fn monthly_means<'a, K: Ord>(
        &self,
        records: impl Iterator<Item = &'a ObservationRecord>,
        key: impl Fn(&ObservationRecord) -> K,
    ) -> BTreeMap<K, MonthlyMeans> {
        let mut accumulators: BTreeMap<K, [(f64, usize); 12]> = BTreeMap::new();
        for record in records {
            let month_index = (record.date.month() - 1) as usize;
            let entry = accumulators.entry(key(record)).or_insert([(0.0, 0); 12]);
            entry[month_index].0 += record.value;
            entry[month_index].1 += 1;
        }

        accumulators
            .into_iter()
            .map(|(key, sums)| {
                let mut means: MonthlyMeans = [None; 12];
                for (month_index, (sum, count)) in sums.into_iter().enumerate() {
                    if count > 0 {
                        means[month_index] = Some(sum / count as f64);
                    }
                }
                (key, means)
            })
            .collect()
    }
}

impl Default for EmissionsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(station: &str, magnitude: u16, ymd: (i32, u32, u32), value: f64) -> ObservationRecord {
        ObservationRecord::new(
            StationId::from(station),
            magnitude,
            date(ymd.0, ymd.1, ymd.2),
            value,
        )
    }

    fn sample_dataset() -> EmissionDataset {
        EmissionDataset::new(vec![
            record("4", 8, (2019, 1, 1), 40.0),
            record("4", 8, (2019, 1, 2), 42.0),
            record("4", 8, (2019, 3, 1), 30.0),
            record("4", 9, (2019, 1, 1), 20.0),
            record("8", 8, (2019, 1, 1), 10.0),
            record("8", 8, (2018, 6, 15), 12.0),
        ])
    }

    #[test]
    fn test_stations_and_magnitudes_sorted_distinct() {
        let analyzer = EmissionsAnalyzer::new();
        let (stations, magnitudes) = analyzer.stations_and_magnitudes(&sample_dataset());
        assert_eq!(stations, vec![StationId::from("4"), StationId::from("8")]);
        assert_eq!(magnitudes, vec![8, 9]);
    }

    #[test]
    fn test_empty_dataset_is_total() {
        let analyzer = EmissionsAnalyzer::new();
        let empty = EmissionDataset::empty();
        let (stations, magnitudes) = analyzer.stations_and_magnitudes(&empty);
        assert!(stations.is_empty());
        assert!(magnitudes.is_empty());
        assert!(analyzer.summary_overall(&empty).is_empty());
        assert!(analyzer
            .range_series(&empty, &StationId::from("4"), 8, date(2019, 1, 1), date(2019, 12, 31))
            .is_empty());
    }

    #[test]
    fn test_range_series_inclusive_bounds() {
        let analyzer = EmissionsAnalyzer::new();
        let ds = sample_dataset();

        let series = analyzer.range_series(
            &ds,
            &StationId::from("4"),
            8,
            date(2019, 1, 1),
            date(2019, 1, 2),
        );
        assert_eq!(series, vec![(date(2019, 1, 1), 40.0), (date(2019, 1, 2), 42.0)]);

        // Inverted range is empty, not an error
        let inverted = analyzer.range_series(
            &ds,
            &StationId::from("4"),
            8,
            date(2019, 2, 1),
            date(2019, 1, 1),
        );
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_range_series_unknown_filters_empty() {
        let analyzer = EmissionsAnalyzer::new();
        let ds = sample_dataset();
        let series = analyzer.range_series(
            &ds,
            &StationId::from("nope"),
            8,
            date(2019, 1, 1),
            date(2019, 12, 31),
        );
        assert!(series.is_empty());
    }

    #[test]
    fn test_summary_overall_counts() {
        let analyzer = EmissionsAnalyzer::new();
        let summary = analyzer.summary_overall(&sample_dataset());
        assert_eq!(summary[&8].count, 5);
        assert_eq!(summary[&9].count, 1);
        assert_eq!(summary[&9].mean, 20.0);
        assert_eq!(summary[&8].min, 10.0);
        assert_eq!(summary[&8].max, 42.0);
    }

    #[test]
    fn test_summary_by_station() {
        let analyzer = EmissionsAnalyzer::new();
        let summary = analyzer.summary_by_station(&sample_dataset());
        assert_eq!(summary[&(StationId::from("4"), 8)].count, 3);
        assert_eq!(summary[&(StationId::from("8"), 8)].count, 2);
        assert!(!summary.contains_key(&(StationId::from("8"), 9)));
    }

    #[test]
    fn test_summary_by_district_unknown_bucket() {
        let analyzer = EmissionsAnalyzer::new();
        let districts = StationDistrictMap::from_iter([("4", "Centro")]);
        let summary = analyzer.summary_by_district(&sample_dataset(), &districts);

        assert_eq!(summary[&("Centro".to_string(), 8)].count, 3);
        assert_eq!(summary[&("Centro".to_string(), 9)].count, 1);
        // Station 8 is not mapped: its two records land in "unknown"
        assert_eq!(summary[&("unknown".to_string(), 8)].count, 2);
    }

    #[test]
    fn test_summary_for_station_magnitude() {
        let analyzer = EmissionsAnalyzer::new();
        let ds = sample_dataset();
        let stats = analyzer
            .summary_for_station_magnitude(&ds, &StationId::from("8"), 8)
            .unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 11.0);

        assert!(analyzer
            .summary_for_station_magnitude(&ds, &StationId::from("8"), 9)
            .is_none());
    }

    #[test]
    fn test_monthly_means_for_magnitude_year() {
        let analyzer = EmissionsAnalyzer::new();
        let means = analyzer.monthly_means_for_magnitude_year(&sample_dataset(), 8, 2019);

        let station_4 = means[&StationId::from("4")];
        assert_eq!(station_4[0], Some(41.0)); // January mean of 40 and 42
        assert_eq!(station_4[1], None);
        assert_eq!(station_4[2], Some(30.0));

        // Station 8 only has a 2018 record for magnitude 8 besides January 2019
        let station_8 = means[&StationId::from("8")];
        assert_eq!(station_8[0], Some(10.0));
        assert_eq!(station_8[5], None);
    }

    #[test]
    fn test_monthly_means_for_station_gap_months() {
        let analyzer = EmissionsAnalyzer::new();
        let means = analyzer.monthly_means_for_station(&sample_dataset(), &StationId::from("4"));

        let magnitude_8 = means[&8];
        assert_eq!(magnitude_8[0], Some(41.0));
        assert_eq!(magnitude_8[2], Some(30.0));
        for month_index in [1, 3, 4, 5, 6, 7, 8, 9, 10, 11] {
            assert_eq!(magnitude_8[month_index], None);
        }
    }
}
