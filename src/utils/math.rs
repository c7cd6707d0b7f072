//! Dense f64 slice math shared by the reducer and the clusterers.

/// d(a, b) = Σ(a_i * b_i)
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "Vectors must be of the same length to compute dot product."
    );
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// ||a|| = sqrt(Σ(a_i^2))
#[inline]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// d(a, b)^2 = Σ((a_i - b_i)^2)
#[inline]
pub fn euclidean_sq(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "Vectors must be of the same length to compute euclidean distance."
    );
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// d(a, b) = sqrt(Σ((a_i - b_i)^2))
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    euclidean_sq(a, b).sqrt()
}

/// Per-column mean over row vectors. Empty input yields an empty vector.
pub fn column_means(rows: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let mut means = vec![0.0; first.len()];
    for row in rows {
        for (m, x) in means.iter_mut().zip(row.iter()) {
            *m += x;
        }
    }
    let n = rows.len() as f64;
    for m in means.iter_mut() {
        *m /= n;
    }
    means
}

/// y = M * v for a square row-major matrix
pub fn matvec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter().map(|row| dot(row, v)).collect()
}
