use num::Num;
use serde::{Deserialize, Serialize};

/// Sparse vector in SoA layout (sorted indices + values).
/// Term-document matrix rows are mostly zero, so only the nonzero cells are
/// stored. Indices are kept sorted ascending; the dot product walks both
/// index lists in a single merge pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpVec<N> {
    len: usize,
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> SpVec<N>
where
    N: Num + Copy,
{
    /// Create an all-zero vector of logical length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Create an all-zero vector with storage reserved for `cap` nonzeros.
    pub fn with_capacity(len: usize, cap: usize) -> Self {
        Self {
            len,
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
        }
    }

    /// Build from a dense slice, skipping zero cells.
    pub fn from_dense(dense: &[N]) -> Self {
        let mut vec = Self::new(dense.len());
        for (i, &v) in dense.iter().enumerate() {
            if !v.is_zero() {
                vec.push(i, v);
            }
        }
        vec
    }

    /// Append a nonzero cell. Indices must arrive in ascending order and
    /// stay below the logical length. Zero values are skipped.
    #[inline]
    pub fn push(&mut self, idx: usize, val: N) {
        debug_assert!(idx < self.len, "index out of range");
        debug_assert!(
            self.inds.last().map_or(true, |&last| (last as usize) < idx),
            "indices must be pushed in ascending order"
        );
        if val.is_zero() {
            return;
        }
        self.inds.push(idx as u32);
        self.vals.push(val);
    }

    /// Logical length (dimensionality), not the nonzero count.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored nonzero cells.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Cell value at `idx`, zero when not stored.
    #[inline]
    pub fn get(&self, idx: usize) -> N {
        debug_assert!(idx < self.len, "index out of range");
        match self.inds.binary_search(&(idx as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate the stored (index, value) pairs in ascending index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (i, v) in self.iter() {
            dense[i] = v;
        }
        dense
    }

    /// Elementwise product with a dense slice of the same length.
    pub fn hadamard_dense(&self, dense: &[N]) -> Self {
        debug_assert_eq!(
            self.len,
            dense.len(),
            "Vectors must be of the same length to compute hadamard product."
        );
        let mut result = Self::with_capacity(self.len, self.nnz());
        for (i, v) in self.iter() {
            result.push(i, v * dense[i]);
        }
        result
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }
}

impl<N> SpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Merge-join dot product of two sparse vectors.
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len,
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        let mut result = 0.0;
        let mut i = 0;
        let mut j = 0;
        while i < self.nnz() && j < other.nnz() {
            match self.inds[i].cmp(&other.inds[j]) {
                std::cmp::Ordering::Equal => {
                    result += self.vals[i].into() * other.vals[j].into();
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// ||v|| over the stored cells.
    pub fn norm(&self) -> f64 {
        self.vals
            .iter()
            .map(|&v| {
                let x: f64 = v.into();
                x * x
            })
            .sum::<f64>()
            .sqrt()
    }

    pub fn to_dense_f64(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.len];
        for (i, v) in self.iter() {
            dense[i] = v.into();
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense baseline for the merge-join dot product.
    fn baseline_dot(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn dense_round_trip() {
        let dense = vec![0.0, 1.5, 0.0, 0.0, 2.5, 0.0];
        let sparse = SpVec::from_dense(&dense);
        assert_eq!(sparse.len(), 6);
        assert_eq!(sparse.nnz(), 2);
        assert_eq!(sparse.to_dense(), dense);
    }

    #[test]
    fn get_returns_zero_for_missing_cells() {
        let sparse = SpVec::from_dense(&[0.0, 3.0, 0.0]);
        assert_eq!(sparse.get(0), 0.0);
        assert_eq!(sparse.get(1), 3.0);
        assert_eq!(sparse.get(2), 0.0);
    }

    #[test]
    fn dot_matches_dense_baseline() {
        let a = vec![0.0, 1.0, 0.0, 2.0, 0.0, 3.0];
        let b = vec![1.0, 0.0, 0.0, 4.0, 5.0, 6.0];
        let sa = SpVec::from_dense(&a);
        let sb = SpVec::from_dense(&b);
        assert!((sa.dot(&sb) - baseline_dot(&a, &b)).abs() < 1e-12);
        // disjoint supports
        let sc = SpVec::from_dense(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let sd = SpVec::from_dense(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(sc.dot(&sd), 0.0);
    }

    #[test]
    fn norm_over_stored_cells() {
        let sparse = SpVec::from_dense(&[0.0, 3.0, 0.0, 4.0]);
        assert!((sparse.norm() - 5.0).abs() < 1e-12);
        assert_eq!(SpVec::<f64>::new(4).norm(), 0.0);
    }

    #[test]
    fn hadamard_with_dense_slice() {
        let sparse = SpVec::from_dense(&[0.0, 2.0, 0.0, 3.0]);
        let scaled = sparse.hadamard_dense(&[10.0, 10.0, 10.0, 0.0]);
        assert_eq!(scaled.to_dense(), vec![0.0, 20.0, 0.0, 0.0]);
        // multiplying into zero drops the cell from storage
        assert_eq!(scaled.nnz(), 1);
    }

    #[test]
    fn push_skips_zeros() {
        let mut sparse: SpVec<f64> = SpVec::new(5);
        sparse.push(1, 0.0);
        sparse.push(3, 2.0);
        assert_eq!(sparse.nnz(), 1);
        assert_eq!(sparse.get(3), 2.0);
    }
}
