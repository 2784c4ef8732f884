//! Descriptive statistics shared by the analysis subcommands.
//!
//! Conventions match the tooling the benchmark tables were originally
//! analyzed with: standard deviation is the sample estimate (ddof = 1) and
//! percentiles interpolate linearly between order statistics.

use serde::{Deserialize, Serialize};

/// Summary statistics for one sample of request durations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (ddof = 1)
    pub std_dev: f64,
    /// Median (p50)
    pub median: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// 5th percentile
    pub p5: f64,
    /// 95th percentile
    pub p95: f64,
    /// Number of samples
    pub count: usize,
}

impl SummaryStats {
    /// Compute summary statistics for a sample. Empty samples yield zeros.
    pub fn from_sample(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::empty();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = mean(values);
        Self {
            mean,
            std_dev: std_dev(values),
            median: percentile_sorted(&sorted, 50.0),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p5: percentile_sorted(&sorted, 5.0),
            p95: percentile_sorted(&sorted, 95.0),
            count: values.len(),
        }
    }

    /// Statistics for an empty sample
    pub fn empty() -> Self {
        Self {
            mean: 0.0,
            std_dev: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
            p5: 0.0,
            p95: 0.0,
            count: 0,
        }
    }

    /// P5–P95 range, the spread metric used for stability comparisons
    pub fn percentile_range(&self) -> f64 {
        self.p95 - self.p5
    }

    /// Coefficient of variation in percent (std/mean), 0 for a zero mean
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean * 100.0
        } else {
            0.0
        }
    }
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); 0 for fewer than two samples
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_squared_diff: f64 = values.iter().map(|&x| (x - m).powi(2)).sum();
    (sum_squared_diff / (values.len() - 1) as f64).sqrt()
}

/// Percentile of an unsorted sample with linear interpolation
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_sorted(&sorted, p)
}

/// Percentile of an ascending-sorted sample with linear interpolation
pub fn percentile_sorted(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let index = (p / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;

    if lower_index == upper_index {
        sorted_values[lower_index]
    } else {
        let lower_value = sorted_values[lower_index];
        let upper_value = sorted_values[upper_index];
        let weight = index - lower_index as f64;
        lower_value + weight * (upper_value - lower_value)
    }
}

/// Count outliers outside the 1.5×IQR fences
pub fn iqr_outliers(values: &[f64]) -> usize {
    if values.len() < 4 {
        return 0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile_sorted(&sorted, 25.0);
    let q3 = percentile_sorted(&sorted, 75.0);
    let iqr = q3 - q1;

    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    values
        .iter()
        .filter(|&&x| x < lower_bound || x > upper_bound)
        .count()
}

/// Relative change from `baseline` to `value`, in percent
pub fn percent_change(baseline: f64, value: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (value - baseline) / baseline * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0]), 2.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(std_dev(&[5.0]), 0.0);
        // Reference: pandas Series([2, 4, 4, 4, 5, 5, 7, 9]).std() = 2.13809...
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&values) - 2.1380899).abs() < 1e-6);
    }

    #[test]
    fn test_percentile_interpolation() {
        let values: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        // Reference: np.percentile(range(1, 11), [50, 90, 100, 5])
        assert_eq!(percentile(&values, 50.0), 5.5);
        assert!((percentile(&values, 90.0) - 9.1).abs() < 1e-9);
        assert_eq!(percentile(&values, 100.0), 10.0);
        assert!((percentile(&values, 5.0) - 1.45).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_empty_and_single() {
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[3.0], 5.0), 3.0);
        assert_eq!(percentile(&[3.0], 95.0), 3.0);
    }

    #[test]
    fn test_summary_stats() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SummaryStats::from_sample(&values);

        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.count, 5);
        // Sample std of 1..5 = sqrt(2.5)
        assert!((stats.std_dev - 2.5f64.sqrt()).abs() < 1e-9);
        assert!(stats.percentile_range() > 0.0);
    }

    #[test]
    fn test_summary_stats_empty() {
        let stats = SummaryStats::from_sample(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let stats = SummaryStats::from_sample(&[1.0, 2.0, 3.0]);
        assert!((stats.coefficient_of_variation() - 100.0 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_iqr_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        assert_eq!(iqr_outliers(&values), 1);
        assert_eq!(iqr_outliers(&[1.0, 2.0, 3.0]), 0);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(2.0, 3.0), 50.0);
        assert_eq!(percent_change(4.0, 2.0), -50.0);
        assert_eq!(percent_change(0.0, 5.0), 0.0);
    }

    proptest! {
        #[test]
        fn percentile_within_bounds(
            values in prop::collection::vec(0.0f64..1e6, 1..200),
            p in 0.0f64..=100.0,
        ) {
            let result = percentile(&values, p);
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(result >= min - 1e-9);
            prop_assert!(result <= max + 1e-9);
        }

        #[test]
        fn std_dev_non_negative(values in prop::collection::vec(-1e6f64..1e6, 0..200)) {
            prop_assert!(std_dev(&values) >= 0.0);
        }

        #[test]
        fn p95_not_below_p5(values in prop::collection::vec(0.0f64..1e6, 1..200)) {
            let stats = SummaryStats::from_sample(&values);
            prop_assert!(stats.percentile_range() >= -1e-9);
        }
    }
}
