use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emisiones-processor")]
#[command(about = "Madrid municipal air-quality emissions normalizer and query tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show stations, magnitudes and record counts of the normalized dataset
    Info {
        #[arg(short, long, required = true, num_args = 1.., help = "Input yearly CSV files")]
        input: Vec<PathBuf>,
    },

    /// Descriptive summaries per magnitude (overall, per station, or per district)
    Summary {
        #[arg(short, long, required = true, num_args = 1.., help = "Input yearly CSV files")]
        input: Vec<PathBuf>,

        #[arg(long, help = "Group by (station, magnitude) instead of magnitude only")]
        by_station: bool,

        #[arg(
            long,
            help = "JSON file mapping station codes to districts; groups by (district, magnitude)"
        )]
        district_map: Option<PathBuf>,

        #[arg(long, help = "Restrict to one station (requires --magnitude)")]
        station: Option<String>,

        #[arg(long, help = "Restrict to one magnitude code (requires --station)")]
        magnitude: Option<u16>,
    },

    /// Observation series for one station and magnitude over a date range
    Series {
        #[arg(short, long, required = true, num_args = 1.., help = "Input yearly CSV files")]
        input: Vec<PathBuf>,

        #[arg(long)]
        station: String,

        #[arg(long)]
        magnitude: u16,

        #[arg(long, help = "Range start, inclusive (YYYY-MM-DD)")]
        start: NaiveDate,

        #[arg(long, help = "Range end, inclusive (YYYY-MM-DD)")]
        end: NaiveDate,
    },

    /// Monthly mean tables, by magnitude+year or by station
    Monthly {
        #[arg(short, long, required = true, num_args = 1.., help = "Input yearly CSV files")]
        input: Vec<PathBuf>,

        #[arg(long, help = "Magnitude code (with --year: stations x months table)")]
        magnitude: Option<u16>,

        #[arg(long, help = "Year (with --magnitude)")]
        year: Option<i32>,

        #[arg(long, help = "Station code (magnitudes x months table)")]
        station: Option<String>,
    },
}
