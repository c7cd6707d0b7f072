//! Distance reporting between document vectors.

use rayon::prelude::*;

use crate::error::{AnalyzeError, Result};
use crate::utils::math;

/// コサイン類似度
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
/// Clamped into [-1, 1] against floating-point drift.
///
/// Fails with [`AnalyzeError::DimensionMismatch`] on unequal lengths and
/// [`AnalyzeError::ZeroMagnitude`] when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(AnalyzeError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    let norm_a = math::norm(a);
    let norm_b = math::norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(AnalyzeError::ZeroMagnitude);
    }
    Ok((math::dot(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// コサイン距離
/// d(a, b) = 1 - cos(θ)
pub fn cosine_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    Ok(1.0 - cosine_similarity(a, b)?)
}

/// Pairwise convention used by the matrix path: a zero-magnitude vector
/// scores the maximal distance 1.0 instead of failing, so corpora that
/// contain empty documents still produce a full report.
pub(crate) fn cosine_distance_or_max(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = math::norm(a);
    let norm_b = math::norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - (math::dot(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Pairwise cosine distance over all document vectors.
/// Symmetric with a zero diagonal. Pairs involving a zero-magnitude vector
/// get the maximal distance 1.0 (documented convention, see
/// [`cosine_distance`] for the strict scalar contract). Rows are computed in
/// parallel.
///
/// Fails with [`AnalyzeError::DimensionMismatch`] when the rows are ragged.
/// An empty input yields an empty matrix.
pub fn distance_matrix(rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let dim = first.len();
    for row in rows {
        if row.len() != dim {
            return Err(AnalyzeError::DimensionMismatch {
                expected: dim,
                got: row.len(),
            });
        }
    }
    Ok(rows
        .par_iter()
        .enumerate()
        .map(|(i, a)| {
            rows.iter()
                .enumerate()
                .map(|(j, b)| {
                    if i == j {
                        0.0
                    } else {
                        cosine_distance_or_max(a, b)
                    }
                })
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_distance_is_zero() {
        let v = vec![0.3, 0.7, 0.1];
        assert!(cosine_distance(&v, &v).unwrap().abs() < 1e-12);
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_vectors_are_maximally_distant() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!((cosine_distance(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scale_invariance() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![2.0, 4.0, 6.0];
        assert!(cosine_distance(&a, &b).unwrap().abs() < 1e-12);
    }

    #[test]
    fn zero_magnitude_is_invalid() {
        let zero = vec![0.0, 0.0];
        let v = vec![1.0, 1.0];
        assert!(matches!(
            cosine_distance(&zero, &v),
            Err(AnalyzeError::ZeroMagnitude)
        ));
        assert!(matches!(
            cosine_distance(&v, &zero),
            Err(AnalyzeError::ZeroMagnitude)
        ));
    }

    #[test]
    fn mismatched_lengths_are_invalid() {
        assert!(matches!(
            cosine_distance(&[1.0, 2.0], &[1.0]),
            Err(AnalyzeError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let rows = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 1.0, 0.0],
        ];
        let matrix = distance_matrix(&rows).unwrap();
        for i in 0..3 {
            assert_eq!(matrix[i][i], 0.0);
            for j in 0..3 {
                assert!((matrix[i][j] - matrix[j][i]).abs() < 1e-15);
                assert!(matrix[i][j] >= 0.0);
            }
        }
        assert!((matrix[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_rows_use_the_maximal_distance_convention() {
        let rows = vec![vec![1.0, 0.0], vec![0.0, 0.0]];
        let matrix = distance_matrix(&rows).unwrap();
        assert_eq!(matrix[0][1], 1.0);
        assert_eq!(matrix[1][0], 1.0);
        assert_eq!(matrix[1][1], 0.0);
    }

    #[test]
    fn empty_input_yields_empty_matrix() {
        assert!(distance_matrix(&[]).unwrap().is_empty());
    }
}
