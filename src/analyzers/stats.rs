use serde::Serialize;

/// Descriptive summary of a numeric sample: count, mean, sample standard
/// deviation, minimum, quartiles, maximum.
///
/// Only constructible from a non-empty sample (`from_sample` returns `None`
/// for an empty one), so an empty group is an absent map entry and NaN
/// never leaks into results. `std_dev` is `None` for a single observation,
/// where the sample standard deviation is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    pub fn from_sample(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;

        let std_dev = if count > 1 {
            let variance = values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (count - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            count,
            mean,
            std_dev,
            min: sorted[0],
            p25: percentile(&sorted, 0.25),
            p50: percentile(&sorted, 0.50),
            p75: percentile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

/// Linearly interpolated percentile over an ascending-sorted non-empty slice
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        sorted[low] + (rank - low as f64) * (sorted[high] - sorted[low])
    }
}
