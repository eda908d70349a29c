//! Feature statistics over embedding vectors
//!
//! Pure functions; identical input always yields identical output. Sums are
//! accumulated left to right so results do not depend on call history.
//!
//! Empty-input convention: every function returns 0 for an empty slice.

use serde::{Deserialize, Serialize};

/// Smallest mean gap used as a divisor in [`cluster_gap_score`]
const MIN_MEAN_GAP: f64 = 1e-6;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (named after the provider-side "variance" feature)
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let m2 = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    m2.sqrt()
}

/// Normalized Shannon entropy of `|v|` treated as an unnormalized distribution
///
/// Divided by `log2(len)`, so the result is in [0, 1]. Returns 0 when the
/// absolute sum is 0 or there is at most one element.
pub fn entropy(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let total: f64 = values.iter().map(|v| v.abs()).sum();
    if total == 0.0 {
        return 0.0;
    }
    let h: f64 = values
        .iter()
        .map(|v| v.abs() / total)
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum();
    h / (values.len() as f64).log2()
}

/// Excess kurtosis `m4 / m2² − 3`; 0 when the second moment is 0
pub fn kurtosis(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mu = mean(values);
    let m2 = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / n;
    if m2 == 0.0 {
        return 0.0;
    }
    let m4 = values.iter().map(|v| (v - mu).powi(4)).sum::<f64>() / n;
    m4 / (m2 * m2) - 3.0
}

/// Clustering proxy: spread of sorted consecutive gaps relative to the mean gap
///
/// `min(1, std(gaps) / max(ε, mean_gap))`; 0 for fewer than two elements or
/// when all values coincide.
pub fn cluster_gap_score(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let gaps: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_gap = mean(&gaps);
    if mean_gap == 0.0 {
        return 0.0;
    }
    (variance(&gaps) / mean_gap.max(MIN_MEAN_GAP)).min(1.0)
}

/// All four statistics for one embedding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub variance: f64,
    pub entropy: f64,
    pub kurtosis: f64,
    pub cluster: f64,
}

impl FeatureStats {
    pub fn compute(values: &[f64]) -> Self {
        Self {
            variance: variance(values),
            entropy: entropy(values),
            kurtosis: kurtosis(values),
            cluster: cluster_gap_score(values),
        }
    }
}
