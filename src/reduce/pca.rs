use log::debug;

use crate::error::{AnalyzeError, Result};
use crate::utils::math;
use crate::utils::rng::XorShift64;

/// Principal component analysis.
/// Centers the data, builds the covariance matrix, and extracts the leading
/// eigenvectors by power iteration with deflation. Deterministic given fixed
/// numerical precision: the start vector comes from a fixed-seed PRNG and
/// the iteration budget is constant, so there is no configuration
/// randomness.
///
/// Sized for small corpora: the covariance matrix is feature × feature.
#[derive(Debug, Clone)]
pub struct PCA {
    n_components: usize,
    components: Vec<Vec<f64>>,
    mean: Vec<f64>,
    explained_variance: Vec<f64>,
    explained_variance_ratio: Vec<f64>,
}

const POWER_MAX_ITER: usize = 300;
const POWER_TOL: f64 = 1e-12;
const START_VECTOR_SEED: u64 = 0x5DEE_CE66_D;

impl PCA {
    /// Fit on row vectors (documents × features).
    ///
    /// # Arguments
    /// * `data` - row vectors, all of the same length
    /// * `n_components` - target dimensionality k, 1 ≤ k ≤ min(rows, cols)
    pub fn fit(data: &[Vec<f64>], n_components: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(AnalyzeError::EmptyCorpus);
        }
        let n_features = data[0].len();
        for row in data {
            if row.len() != n_features {
                return Err(AnalyzeError::DimensionMismatch {
                    expected: n_features,
                    got: row.len(),
                });
            }
        }
        let max = data.len().min(n_features);
        if n_components == 0 || n_components > max {
            return Err(AnalyzeError::InvalidComponentCount {
                count: n_components,
                max,
            });
        }

        let mean = math::column_means(data);
        let centered: Vec<Vec<f64>> = data
            .iter()
            .map(|row| row.iter().zip(mean.iter()).map(|(x, m)| x - m).collect())
            .collect();
        let cov = covariance(&centered);
        let total_variance: f64 = (0..n_features).map(|i| cov[i][i]).sum();

        let mut deflated = cov;
        let mut components: Vec<Vec<f64>> = Vec::with_capacity(n_components);
        let mut explained_variance: Vec<f64> = Vec::with_capacity(n_components);
        for c in 0..n_components {
            let (eigenvalue, eigenvector) = power_iteration(&deflated, c);
            // covariance is PSD, negative values are numerical noise
            let eigenvalue = eigenvalue.max(0.0);
            // Deflate: A = A - λ * v * v^T
            for i in 0..n_features {
                for j in 0..n_features {
                    deflated[i][j] -= eigenvalue * eigenvector[i] * eigenvector[j];
                }
            }
            explained_variance.push(eigenvalue);
            components.push(eigenvector);
        }

        // Deflation can leave slight disorder, sort by eigenvalue descending
        let mut order: Vec<usize> = (0..n_components).collect();
        order.sort_by(|&a, &b| explained_variance[b].total_cmp(&explained_variance[a]));
        let components: Vec<Vec<f64>> = order.iter().map(|&i| components[i].clone()).collect();
        let explained_variance: Vec<f64> = order.iter().map(|&i| explained_variance[i]).collect();

        let explained_variance_ratio: Vec<f64> = if total_variance > 0.0 {
            explained_variance
                .iter()
                .map(|v| v / total_variance)
                .collect()
        } else {
            vec![0.0; n_components]
        };

        debug!(
            "pca fit: {} components over {} features, leading ratio {:.4}",
            n_components,
            n_features,
            explained_variance_ratio.first().copied().unwrap_or(0.0)
        );
        Ok(Self {
            n_components,
            components,
            mean,
            explained_variance,
            explained_variance_ratio,
        })
    }

    /// Project row vectors into component space (documents × k).
    pub fn transform(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        for row in data {
            if row.len() != self.mean.len() {
                return Err(AnalyzeError::DimensionMismatch {
                    expected: self.mean.len(),
                    got: row.len(),
                });
            }
        }
        Ok(data
            .iter()
            .map(|row| {
                let centered: Vec<f64> = row
                    .iter()
                    .zip(self.mean.iter())
                    .map(|(x, m)| x - m)
                    .collect();
                self.components
                    .iter()
                    .map(|component| math::dot(&centered, component))
                    .collect()
            })
            .collect())
    }

    /// Fit and project in one step.
    pub fn fit_transform(data: &[Vec<f64>], n_components: usize) -> Result<(Self, Vec<Vec<f64>>)> {
        let pca = Self::fit(data, n_components)?;
        let transformed = pca.transform(data)?;
        Ok((pca, transformed))
    }

    #[inline]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Principal directions, one per component (each feature-length)
    #[inline]
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// Column means used for centering
    #[inline]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Variance along each retained component
    #[inline]
    pub fn explained_variance(&self) -> &[f64] {
        &self.explained_variance
    }

    /// Fraction of total variance along each retained component
    #[inline]
    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }
}

/// Covariance = (X^T X) / (n - 1) over centered rows.
/// A single row has no variance, the matrix is zero.
fn covariance(centered: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = centered.len();
    let n_features = centered[0].len();
    let mut cov = vec![vec![0.0; n_features]; n_features];
    if n < 2 {
        return cov;
    }
    for row in centered {
        for i in 0..n_features {
            let xi = row[i];
            if xi == 0.0 {
                continue;
            }
            for j in 0..n_features {
                cov[i][j] += xi * row[j];
            }
        }
    }
    let scale = 1.0 / (n as f64 - 1.0);
    for row in cov.iter_mut() {
        for value in row.iter_mut() {
            *value *= scale;
        }
    }
    cov
}

/// Power iteration for the largest eigenpair of a symmetric matrix.
/// The start vector is drawn from a fixed seed mixed with the component
/// index, so repeated fits are identical.
fn power_iteration(matrix: &[Vec<f64>], component: usize) -> (f64, Vec<f64>) {
    let n = matrix.len();
    let mut rng = XorShift64::new(START_VECTOR_SEED ^ component as u64);
    let mut v: Vec<f64> = (0..n).map(|_| rng.next_f64() - 0.5).collect();
    let start_norm = math::norm(&v);
    if start_norm > 0.0 {
        for x in v.iter_mut() {
            *x /= start_norm;
        }
    } else {
        v = vec![1.0 / (n as f64).sqrt(); n];
    }

    let mut eigenvalue = 0.0;
    for _ in 0..POWER_MAX_ITER {
        let av = math::matvec(matrix, &v);
        // Rayleigh quotient (v is unit length)
        let new_eigenvalue = math::dot(&v, &av);
        let norm = math::norm(&av);
        if norm < 1e-300 {
            // matrix is (numerically) zero after deflation
            return (0.0, v);
        }
        let new_v: Vec<f64> = av.iter().map(|x| x / norm).collect();
        if (new_eigenvalue - eigenvalue).abs() < POWER_TOL {
            return (new_eigenvalue, new_v);
        }
        eigenvalue = new_eigenvalue;
        v = new_v;
    }
    (eigenvalue, v)
}
