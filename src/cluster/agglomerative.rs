use ::serde::{Deserialize, Serialize};
use log::debug;

use crate::cluster::{validate_input, Clustering};
use crate::compare::cosine_distance_or_max;
use crate::error::Result;
use crate::utils::math;

/// Rule for measuring distance between clusters during hierarchical merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Linkage {
    /// Distance between the closest members
    Single,
    /// Distance between the farthest members
    Complete,
    /// Size-weighted mean of member distances
    Average,
    /// Minimal increase in within-cluster variance.
    /// Always operates on squared euclidean distances, the metric option
    /// does not apply.
    Ward,
}

/// Point-distance metric for the initial dissimilarity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Euclidean,
    /// Cosine distance; zero-magnitude vectors score the maximal
    /// distance 1.0
    Cosine,
}

/// Hierarchical (agglomerative) clustering.
/// Starts from singleton clusters and repeatedly merges the two closest
/// clusters under the configured linkage, updating merged distances with the
/// Lance-Williams recurrences, until exactly k clusters remain.
///
/// Fully deterministic: distance ties are broken toward the lowest cluster
/// indices, and labels are assigned in order of each cluster's smallest
/// document index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agglomerative {
    linkage: Linkage,
    metric: Metric,
}

impl Agglomerative {
    pub fn new(linkage: Linkage) -> Self {
        Self {
            linkage,
            metric: Metric::Euclidean,
        }
    }

    /// Set the point-distance metric (ignored by ward linkage)
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }
}

impl Default for Agglomerative {
    fn default() -> Self {
        Self::new(Linkage::Ward)
    }
}

impl Clustering for Agglomerative {
    fn fit_predict(&self, data: &[Vec<f64>], k: usize) -> Result<Vec<usize>> {
        validate_input(data, k)?;
        let n = data.len();

        // initial pairwise dissimilarity
        let mut dist = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = match (self.linkage, self.metric) {
                    (Linkage::Ward, _) => math::euclidean_sq(&data[i], &data[j]),
                    (_, Metric::Euclidean) => math::euclidean(&data[i], &data[j]),
                    (_, Metric::Cosine) => cosine_distance_or_max(&data[i], &data[j]),
                };
                dist[i][j] = d;
                dist[j][i] = d;
            }
        }

        let mut active = vec![true; n];
        let mut size = vec![1usize; n];
        let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

        for _ in 0..(n - k) {
            // closest active pair, lowest indices on ties
            let mut best = f64::INFINITY;
            let (mut bi, mut bj) = (0, 0);
            for i in 0..n {
                if !active[i] {
                    continue;
                }
                for j in (i + 1)..n {
                    if active[j] && dist[i][j] < best {
                        best = dist[i][j];
                        bi = i;
                        bj = j;
                    }
                }
            }

            // merge bj into bi (bi < bj), update distances to the rest
            for m in 0..n {
                if m == bi || m == bj || !active[m] {
                    continue;
                }
                let d = lance_williams(
                    self.linkage,
                    dist[bi][m],
                    dist[bj][m],
                    dist[bi][bj],
                    size[bi],
                    size[bj],
                    size[m],
                );
                dist[bi][m] = d;
                dist[m][bi] = d;
            }
            size[bi] += size[bj];
            let moved = std::mem::take(&mut members[bj]);
            members[bi].extend(moved);
            active[bj] = false;
        }

        // roots ascend, so clusters come out ordered by smallest member
        let mut labels = vec![0usize; n];
        let mut label = 0;
        for root in 0..n {
            if active[root] {
                for &member in &members[root] {
                    labels[member] = label;
                }
                label += 1;
            }
        }
        debug!(
            "agglomerative: k={} n={} linkage={:?} metric={:?}",
            k, n, self.linkage, self.metric
        );
        Ok(labels)
    }
}

/// Lance-Williams distance update for merging clusters i and j, measured
/// against cluster m.
fn lance_williams(
    linkage: Linkage,
    d_im: f64,
    d_jm: f64,
    d_ij: f64,
    si: usize,
    sj: usize,
    sm: usize,
) -> f64 {
    match linkage {
        Linkage::Single => d_im.min(d_jm),
        Linkage::Complete => d_im.max(d_jm),
        Linkage::Average => {
            let (si, sj) = (si as f64, sj as f64);
            (si * d_im + sj * d_jm) / (si + sj)
        }
        Linkage::Ward => {
            let (si, sj, sm) = (si as f64, sj as f64, sm as f64);
            ((si + sm) * d_im + (sj + sm) * d_jm - sm * d_ij) / (si + sj + sm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;

    fn two_blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.2, 0.1],
            vec![0.1, 0.2],
            vec![10.0, 10.0],
            vec![10.2, 10.1],
            vec![10.1, 10.2],
        ]
    }

    #[test]
    fn every_linkage_separates_two_blobs() {
        let data = two_blobs();
        for linkage in [
            Linkage::Single,
            Linkage::Complete,
            Linkage::Average,
            Linkage::Ward,
        ] {
            let labels = Agglomerative::new(linkage).fit_predict(&data, 2).unwrap();
            assert_eq!(labels[0], labels[1], "{:?}", linkage);
            assert_eq!(labels[1], labels[2], "{:?}", linkage);
            assert_eq!(labels[3], labels[4], "{:?}", linkage);
            assert_eq!(labels[4], labels[5], "{:?}", linkage);
            assert_ne!(labels[0], labels[3], "{:?}", linkage);
        }
    }

    #[test]
    fn labels_follow_document_order() {
        let data = two_blobs();
        let labels = Agglomerative::default().fit_predict(&data, 2).unwrap();
        // the cluster containing document 0 always gets label 0
        assert_eq!(labels[0], 0);
        assert_eq!(labels[3], 1);
    }

    #[test]
    fn k_equals_n_keeps_singletons() {
        let data = two_blobs();
        let labels = Agglomerative::default().fit_predict(&data, 6).unwrap();
        assert_eq!(labels, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn k_equals_one_merges_everything() {
        let data = two_blobs();
        let labels = Agglomerative::default().fit_predict(&data, 1).unwrap();
        assert!(labels.iter().all(|&label| label == 0));
    }

    #[test]
    fn cosine_metric_groups_by_direction() {
        // same direction, different magnitude
        let data = vec![
            vec![1.0, 0.0],
            vec![5.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 7.0],
        ];
        let labels = Agglomerative::new(Linkage::Average)
            .metric(Metric::Cosine)
            .fit_predict(&data, 2)
            .unwrap();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn too_many_clusters_is_invalid() {
        let data = vec![vec![1.0], vec![2.0], vec![3.0]];
        assert!(matches!(
            Agglomerative::default().fit_predict(&data, 5),
            Err(AnalyzeError::InvalidClusterCount { count: 5, max: 3 })
        ));
    }

    #[test]
    fn deterministic_across_runs() {
        let data = two_blobs();
        let a = Agglomerative::new(Linkage::Ward).fit_predict(&data, 3).unwrap();
        let b = Agglomerative::new(Linkage::Ward).fit_predict(&data, 3).unwrap();
        assert_eq!(a, b);
    }
}
