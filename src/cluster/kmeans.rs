use ::serde::{Deserialize, Serialize};
use log::debug;

use crate::cluster::{validate_input, Clustering};
use crate::error::Result;
use crate::utils::math;
use crate::utils::rng::XorShift64;

/// Centroid-based clustering (Lloyd's algorithm with k-means++ seeding).
/// Initializes k centroids from a seeded PRNG, then alternates nearest-
/// centroid assignment and centroid recomputation until the assignments
/// stabilize or the iteration budget runs out. Non-convergence returns the
/// last assignment, not an error.
///
/// The seed is explicit so runs are reproducible; no process-wide random
/// state is involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeans {
    max_iter: usize,
    seed: u64,
}

impl KMeans {
    /// Default configuration: 100 iterations, seed 0
    pub fn new() -> Self {
        Self {
            max_iter: 100,
            seed: 0,
        }
    }

    /// Set the iteration budget
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Set the seed for centroid initialization
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new()
    }
}

impl Clustering for KMeans {
    fn fit_predict(&self, data: &[Vec<f64>], k: usize) -> Result<Vec<usize>> {
        let dim = validate_input(data, k)?;
        let n = data.len();
        let mut rng = XorShift64::new(self.seed);
        let mut centroids = init_plus_plus(data, k, &mut rng);
        let mut labels = vec![0usize; n];
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..self.max_iter {
            iterations = iter + 1;

            // assignment step, ties go to the lowest centroid index
            let mut changed = false;
            for (i, point) in data.iter().enumerate() {
                let nearest = nearest_centroid(point, &centroids);
                if labels[i] != nearest {
                    labels[i] = nearest;
                    changed = true;
                }
            }
            if iter > 0 && !changed {
                converged = true;
                break;
            }

            // update step
            let mut sums = vec![vec![0.0; dim]; k];
            let mut counts = vec![0usize; k];
            for (point, &label) in data.iter().zip(labels.iter()) {
                counts[label] += 1;
                for (s, x) in sums[label].iter_mut().zip(point.iter()) {
                    *s += x;
                }
            }
            let empty: Vec<usize> = (0..k).filter(|&c| counts[c] == 0).collect();
            for c in 0..k {
                if counts[c] > 0 {
                    for s in sums[c].iter_mut() {
                        *s /= counts[c] as f64;
                    }
                    centroids[c] = std::mem::take(&mut sums[c]);
                }
            }
            if !empty.is_empty() {
                reseed_empty_clusters(data, &labels, &mut centroids, &empty);
            }
        }

        debug!(
            "k-means: k={} n={} iterations={} converged={}",
            k, n, iterations, converged
        );
        Ok(labels)
    }
}

/// k-means++ initialization: each new centroid is sampled with probability
/// proportional to its squared distance from the nearest chosen centroid.
fn init_plus_plus(data: &[Vec<f64>], k: usize, rng: &mut XorShift64) -> Vec<Vec<f64>> {
    let n = data.len();
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
    centroids.push(data[rng.next_index(n)].clone());

    let mut dists: Vec<f64> = data
        .iter()
        .map(|point| math::euclidean_sq(point, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = dists.iter().sum();
        let next = if total > 0.0 {
            let r = rng.next_f64() * total;
            let mut acc = 0.0;
            let mut chosen = n - 1;
            for (i, &d) in dists.iter().enumerate() {
                acc += d;
                if acc > r {
                    chosen = i;
                    break;
                }
            }
            chosen
        } else {
            // all remaining points coincide with a centroid
            rng.next_index(n)
        };
        let centroid = data[next].clone();
        for (d, point) in dists.iter_mut().zip(data.iter()) {
            let dist = math::euclidean_sq(point, &centroid);
            if dist < *d {
                *d = dist;
            }
        }
        centroids.push(centroid);
    }
    centroids
}

/// Index of the nearest centroid, lowest index on ties.
fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = math::euclidean_sq(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

/// Move each emptied centroid onto the point farthest from its current
/// centroid, one distinct point per empty cluster, picked deterministically.
fn reseed_empty_clusters(
    data: &[Vec<f64>],
    labels: &[usize],
    centroids: &mut [Vec<f64>],
    empty: &[usize],
) {
    let mut farthest: Vec<(usize, f64)> = data
        .iter()
        .enumerate()
        .map(|(i, point)| (i, math::euclidean_sq(point, &centroids[labels[i]])))
        .collect();
    farthest.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    for (slot, &cluster) in empty.iter().enumerate() {
        if let Some(&(point_idx, _)) = farthest.get(slot) {
            centroids[cluster] = data[point_idx].clone();
        }
    }
}
