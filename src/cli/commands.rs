use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::analyzers::{DescriptiveStats, EmissionsAnalyzer, MonthlyMeans};
use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::models::{EmissionDataset, MagnitudeCatalog, StationDistrictMap, StationId};
use crate::processors::Normalizer;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let dataset = load(&input, cli.quiet)?;
            let analyzer = EmissionsAnalyzer::new();
            let catalog = MagnitudeCatalog::municipal();
            let (stations, magnitudes) = analyzer.stations_and_magnitudes(&dataset);

            println!("Observations: {}", dataset.len());
            println!("\nStations ({}):", stations.len());
            for station in &stations {
                println!("  {}", station);
            }
            println!("\nMagnitudes ({}):", magnitudes.len());
            for magnitude in &magnitudes {
                println!("  {}", catalog.label(*magnitude));
            }
        }

        Commands::Summary {
            input,
            by_station,
            district_map,
            station,
            magnitude,
        } => {
            let dataset = load(&input, cli.quiet)?;
            let analyzer = EmissionsAnalyzer::new();
            let catalog = MagnitudeCatalog::municipal();

            match (station, magnitude) {
                (Some(station), Some(magnitude)) => {
                    let station = StationId::new(&station);
                    match analyzer.summary_for_station_magnitude(&dataset, &station, magnitude) {
                        Some(stats) => {
                            println!("Station {} - {}", station, catalog.label(magnitude));
                            print_stats("  ", &stats);
                        }
                        None => println!("No observations for that station and magnitude"),
                    }
                }
                (None, None) => {
                    if let Some(path) = district_map {
                        let districts = StationDistrictMap::from_json_file(&path)?;
                        for ((district, magnitude), stats) in
                            analyzer.summary_by_district(&dataset, &districts)
                        {
                            println!("District {} - {}", district, catalog.label(magnitude));
                            print_stats("  ", &stats);
                        }
                    } else if by_station {
                        for ((station, magnitude), stats) in analyzer.summary_by_station(&dataset) {
                            println!("Station {} - {}", station, catalog.label(magnitude));
                            print_stats("  ", &stats);
                        }
                    } else {
                        for (magnitude, stats) in analyzer.summary_overall(&dataset) {
                            println!("{}", catalog.label(magnitude));
                            print_stats("  ", &stats);
                        }
                    }
                }
                _ => {
                    return Err(ProcessingError::InvalidArgument(
                        "--station and --magnitude must be given together".to_string(),
                    ));
                }
            }
        }

        Commands::Series {
            input,
            station,
            magnitude,
            start,
            end,
        } => {
            let dataset = load(&input, cli.quiet)?;
            let analyzer = EmissionsAnalyzer::new();
            let catalog = MagnitudeCatalog::municipal();
            let station = StationId::new(&station);

            let series = analyzer.range_series(&dataset, &station, magnitude, start, end);
            println!(
                "Station {} - {} from {} to {} ({} observations)",
                station,
                catalog.label(magnitude),
                start,
                end,
                series.len()
            );
            for (date, value) in series {
                println!("{}  {:.2}", date, value);
            }
        }

        Commands::Monthly {
            input,
            magnitude,
            year,
            station,
        } => {
            let catalog = MagnitudeCatalog::municipal();
            match (magnitude, year, station) {
                (Some(magnitude), Some(year), None) => {
                    let dataset = load(&input, cli.quiet)?;
                    let analyzer = EmissionsAnalyzer::new();
                    println!("Monthly means, {} in {}", catalog.label(magnitude), year);
                    for (station, means) in
                        analyzer.monthly_means_for_magnitude_year(&dataset, magnitude, year)
                    {
                        print_monthly_row(&station.to_string(), &means);
                    }
                }
                (None, None, Some(station)) => {
                    let dataset = load(&input, cli.quiet)?;
                    let analyzer = EmissionsAnalyzer::new();
                    let station = StationId::new(&station);
                    println!("Monthly means at station {}", station);
                    for (magnitude, means) in
                        analyzer.monthly_means_for_station(&dataset, &station)
                    {
                        print_monthly_row(&catalog.label(magnitude), &means);
                    }
                }
                _ => {
                    return Err(ProcessingError::InvalidArgument(
                        "use either --magnitude with --year, or --station".to_string(),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(paths: &[PathBuf], quiet: bool) -> Result<EmissionDataset> {
    let progress = ProgressReporter::new(paths.len() as u64, "Loading emission files...", quiet);
    let dataset = Normalizer::new().load_files(paths, Some(&progress))?;
    progress.finish_with_message(&format!("Normalized {} observations", dataset.len()));
    Ok(dataset)
}

fn print_stats(indent: &str, stats: &DescriptiveStats) {
    let std_dev = stats
        .std_dev
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "{}count={} mean={:.2} std={} min={:.2} p25={:.2} p50={:.2} p75={:.2} max={:.2}",
        indent, stats.count, stats.mean, std_dev, stats.min, stats.p25, stats.p50, stats.p75,
        stats.max
    );
}

fn print_monthly_row(label: &str, means: &MonthlyMeans) {
    let cells: Vec<String> = means
        .iter()
        .map(|mean| match mean {
            Some(value) => format!("{:>7.2}", value),
            None => format!("{:>7}", "-"),
        })
        .collect();
    println!("{:<32} {}", label, cells.join(" "));
}
