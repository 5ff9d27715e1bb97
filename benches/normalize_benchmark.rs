use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use emisiones_processor::analyzers::EmissionsAnalyzer;
use emisiones_processor::models::{RawWideRecord, StationId};
use emisiones_processor::processors::Normalizer;

// Create wide-format test rows: one row per (station, magnitude, month),
// values present for most days with a sprinkling of nulls
fn create_wide_rows(station_count: usize, magnitude_count: usize, months: u32) -> Vec<RawWideRecord> {
    let mut rows = Vec::new();

    for station in 1..=station_count {
        for magnitude in 1..=magnitude_count {
            for month in 1..=months {
                let days = (1..=31)
                    .map(|day| {
                        let value = if day % 7 == 0 {
                            None // sensor gap
                        } else {
                            Some(10.0 + station as f64 + day as f64 * 0.3)
                        };
                        (day as u8, value)
                    })
                    .collect();

                rows.push(
                    RawWideRecord::new(
                        StationId::from(format!("2807900{}", station).as_str()),
                        magnitude as u16,
                        2019,
                        month,
                    )
                    .with_days(days),
                );
            }
        }
    }

    rows
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for station_count in [5, 20] {
        let rows = create_wide_rows(station_count, 4, 12);
        group.bench_with_input(
            BenchmarkId::from_parameter(station_count),
            &rows,
            |b, rows| {
                let normalizer = Normalizer::new();
                b.iter(|| normalizer.normalize(black_box(rows.clone())));
            },
        );
    }

    group.finish();
}

fn benchmark_summaries(c: &mut Criterion) {
    let normalizer = Normalizer::new();
    let dataset = normalizer.normalize(create_wide_rows(20, 4, 12));
    let analyzer = EmissionsAnalyzer::new();

    c.bench_function("summary_overall", |b| {
        b.iter(|| analyzer.summary_overall(black_box(&dataset)))
    });

    c.bench_function("summary_by_station", |b| {
        b.iter(|| analyzer.summary_by_station(black_box(&dataset)))
    });
}

criterion_group!(benches, benchmark_normalize, benchmark_summaries);
criterion_main!(benches);
