pub mod emissions_analyzer;
pub mod stats;

pub use emissions_analyzer::{EmissionsAnalyzer, MonthlyMeans};
pub use stats::DescriptiveStats;
