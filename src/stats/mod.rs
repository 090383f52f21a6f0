//! Timing statistics for collected sample sets.
//!
//! Aggregation is deliberately plain: mean, median, sample standard
//! deviation, extremes, and a coefficient-of-variation quality grade.

pub mod outliers;

use std::fmt;

/// Aggregate statistics over a non-empty sample set, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    /// Sample (N-1) standard deviation; 0.0 for a single sample.
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub count: usize,
}

impl Summary {
    /// Aggregate a sample set. Returns `None` for an empty set, which is
    /// the caller's signal that no usable timing data exists.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = median_of_sorted(&sorted);
        let min = sorted[0];
        let max = sorted[count - 1];

        Some(Self {
            mean,
            median,
            stdev: sample_stdev(samples, mean),
            min,
            max,
            range: max - min,
            count,
        })
    }

    /// stdev/mean as a percentage; 0.0 when the mean is not positive.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.stdev / self.mean * 100.0
        } else {
            0.0
        }
    }

    pub fn quality(&self) -> Quality {
        Quality::from_cv(self.coefficient_of_variation())
    }
}

/// Measurement-quality grade keyed on the coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Quality {
    /// Thresholds: < 3% EXCELLENT, < 5% GOOD, < 10% FAIR, else POOR.
    pub fn from_cv(cv_percent: f64) -> Self {
        if cv_percent < 3.0 {
            Quality::Excellent
        } else if cv_percent < 5.0 {
            Quality::Good
        } else if cv_percent < 10.0 {
            Quality::Fair
        } else {
            Quality::Poor
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::Excellent => "EXCELLENT",
            Quality::Good => "GOOD",
            Quality::Fair => "FAIR",
            Quality::Poor => "POOR",
        };
        f.write_str(label)
    }
}

/// Median of an already-sorted slice; even-sized sets average the middle pair.
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    debug_assert!(n > 0);
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Median of an arbitrary slice (sorts a copy).
pub fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    median_of_sorted(&sorted)
}

fn sample_stdev(samples: &[f64], mean: f64) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let variance = samples
        .iter()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_summary() {
        assert!(Summary::from_samples(&[]).is_none());
    }

    #[test]
    fn single_sample_has_zero_stdev() {
        let summary = Summary::from_samples(&[1.5]).unwrap();
        assert_eq!(summary.stdev, 0.0);
        assert_eq!(summary.mean, 1.5);
        assert_eq!(summary.median, 1.5);
        assert_eq!(summary.range, 0.0);
    }

    #[test]
    fn identical_samples_have_zero_stdev() {
        let summary = Summary::from_samples(&[2.0, 2.0, 2.0, 2.0]).unwrap();
        assert_eq!(summary.stdev, 0.0);
    }

    #[test]
    fn unequal_samples_have_positive_stdev() {
        let summary = Summary::from_samples(&[1.0, 2.0]).unwrap();
        assert!(summary.stdev > 0.0);
    }

    #[test]
    fn sample_stdev_uses_n_minus_one() {
        // Variance of [2, 4, 6] around mean 4 is (4 + 0 + 4) / 2 = 4.
        let summary = Summary::from_samples(&[2.0, 4.0, 6.0]).unwrap();
        assert!((summary.stdev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn median_of_odd_set() {
        let summary = Summary::from_samples(&[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(summary.median, 4.0);
    }

    #[test]
    fn median_of_even_set_averages_middle_pair() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), 2.5);
        assert_eq!(median(&[4.0, 1.0]), 2.5);
    }

    #[test]
    fn mean_of_skewed_set() {
        let summary = Summary::from_samples(&[1.0, 2.0, 3.0, 10.0]).unwrap();
        assert!((summary.mean - 4.0).abs() < 1e-12);
    }

    #[test]
    fn median_lies_within_extremes() {
        let sets: [&[f64]; 3] = [
            &[0.3, 0.1, 0.2],
            &[5.0, 5.0, 5.0, 5.0],
            &[9.0, 1.0, 4.0, 7.0, 2.0, 8.0],
        ];
        for samples in sets {
            let summary = Summary::from_samples(samples).unwrap();
            assert!(summary.median >= summary.min);
            assert!(summary.median <= summary.max);
        }
    }

    #[test]
    fn cv_is_zero_for_degenerate_mean() {
        let summary = Summary {
            mean: 0.0,
            median: 0.0,
            stdev: 0.0,
            min: 0.0,
            max: 0.0,
            range: 0.0,
            count: 2,
        };
        assert_eq!(summary.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn quality_thresholds() {
        assert_eq!(Quality::from_cv(0.0), Quality::Excellent);
        assert_eq!(Quality::from_cv(2.99), Quality::Excellent);
        assert_eq!(Quality::from_cv(3.0), Quality::Good);
        assert_eq!(Quality::from_cv(4.99), Quality::Good);
        assert_eq!(Quality::from_cv(5.0), Quality::Fair);
        assert_eq!(Quality::from_cv(9.99), Quality::Fair);
        assert_eq!(Quality::from_cv(10.0), Quality::Poor);
        assert_eq!(Quality::Poor.to_string(), "POOR");
    }
}
