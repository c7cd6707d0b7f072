pub mod agglomerative;
pub mod kmeans;

pub use agglomerative::{Agglomerative, Linkage, Metric};
pub use kmeans::KMeans;

use crate::error::{AnalyzeError, Result};
use crate::utils::math;

/// Hard clustering strategy.
/// Partitions document vectors (raw tf-idf rows or reduced components) into
/// a fixed number of groups. Implementations are interchangeable behind this
/// trait.
pub trait Clustering {
    /// Partition `data` into exactly `k` groups.
    ///
    /// # Arguments
    /// * `data` - document vectors, all of the same length
    /// * `k` - requested cluster count, 1 ≤ k ≤ data.len()
    ///
    /// # Returns
    /// * `Vec<usize>` - one label in `0..k` per document; labels carry no
    ///   ordinal meaning
    fn fit_predict(&self, data: &[Vec<f64>], k: usize) -> Result<Vec<usize>>;
}

/// Shared input validation: nonempty, rectangular, 1 ≤ k ≤ n.
/// Returns the row dimensionality.
pub(crate) fn validate_input(data: &[Vec<f64>], k: usize) -> Result<usize> {
    if data.is_empty() {
        return Err(AnalyzeError::EmptyCorpus);
    }
    let dim = data[0].len();
    for row in data {
        if row.len() != dim {
            return Err(AnalyzeError::DimensionMismatch {
                expected: dim,
                got: row.len(),
            });
        }
    }
    if k == 0 || k > data.len() {
        return Err(AnalyzeError::InvalidClusterCount {
            count: k,
            max: data.len(),
        });
    }
    Ok(dim)
}

/// Mean silhouette coefficient over all points (euclidean distance).
/// For each point: a = mean distance to its own cluster, b = smallest mean
/// distance to another cluster, s = (b - a) / max(a, b). Singleton clusters
/// contribute s = 0. Requires at least two populated clusters.
pub fn silhouette_score(data: &[Vec<f64>], labels: &[usize]) -> Result<f64> {
    if data.is_empty() {
        return Err(AnalyzeError::EmptyCorpus);
    }
    if labels.len() != data.len() {
        return Err(AnalyzeError::DimensionMismatch {
            expected: data.len(),
            got: labels.len(),
        });
    }
    let dim = data[0].len();
    for row in data {
        if row.len() != dim {
            return Err(AnalyzeError::DimensionMismatch {
                expected: dim,
                got: row.len(),
            });
        }
    }

    let k = labels.iter().max().map_or(0, |&m| m + 1);
    let mut sizes = vec![0usize; k];
    for &label in labels {
        sizes[label] += 1;
    }
    let populated = sizes.iter().filter(|&&s| s > 0).count();
    if populated < 2 {
        return Err(AnalyzeError::InvalidClusterCount {
            count: populated,
            max: data.len(),
        });
    }

    let n = data.len();
    let mut total = 0.0;
    for i in 0..n {
        if sizes[labels[i]] == 1 {
            continue; // singleton, s = 0
        }
        // mean distance to every cluster
        let mut dist_sums = vec![0.0; k];
        for j in 0..n {
            if i == j {
                continue;
            }
            dist_sums[labels[j]] += math::euclidean(&data[i], &data[j]);
        }
        let own = labels[i];
        let a = dist_sums[own] / (sizes[own] - 1) as f64;
        let b = (0..k)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| dist_sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);
        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }
    Ok(total / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_catches_bad_input() {
        let data = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        assert!(validate_input(&data, 2).is_ok());
        assert!(matches!(
            validate_input(&data, 0),
            Err(AnalyzeError::InvalidClusterCount { count: 0, max: 3 })
        ));
        assert!(matches!(
            validate_input(&data, 5),
            Err(AnalyzeError::InvalidClusterCount { count: 5, max: 3 })
        ));
        assert!(matches!(
            validate_input(&[], 1),
            Err(AnalyzeError::EmptyCorpus)
        ));
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            validate_input(&ragged, 1),
            Err(AnalyzeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn silhouette_rewards_separated_clusters() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![10.0, 10.0],
            vec![10.1, 10.0],
        ];
        let good = silhouette_score(&data, &[0, 0, 1, 1]).unwrap();
        let bad = silhouette_score(&data, &[0, 1, 0, 1]).unwrap();
        assert!(good > 0.9, "good split scored {}", good);
        assert!(bad < 0.0, "mixed split scored {}", bad);
    }

    #[test]
    fn silhouette_needs_two_clusters() {
        let data = vec![vec![0.0], vec![1.0]];
        assert!(matches!(
            silhouette_score(&data, &[0, 0]),
            Err(AnalyzeError::InvalidClusterCount { .. })
        ));
        assert!(matches!(
            silhouette_score(&data, &[0]),
            Err(AnalyzeError::DimensionMismatch { .. })
        ));
    }
}
