//! Test data generators for quasi-regular (reduced) grids.
//!
//! These generators create predictable, verifiable patterns so that
//! resampled output can be checked against the analytic function the
//! samples came from.

/// Row point counts of an octahedral reduced Gaussian grid.
///
/// Rows nearest the poles have 20 points, each row towards the equator adds
/// 4, and the southern hemisphere mirrors the northern one.
///
/// # Example
///
/// ```
/// use test_utils::octahedral_parallels;
///
/// assert_eq!(octahedral_parallels(4), vec![20, 24, 24, 20]);
/// ```
pub fn octahedral_parallels(nj: usize) -> Vec<u32> {
    (0..nj)
        .map(|j| {
            let from_pole = j.min(nj - 1 - j) as u32;
            20 + 4 * from_pole
        })
        .collect()
}

/// Widest row of a set of parallels, i.e. the natural `ni` to resample to.
pub fn max_parallel(parallels: &[u32]) -> usize {
    parallels.iter().copied().max().unwrap_or(0) as usize
}

/// Flattened samples for a quasi-regular grid.
///
/// `f(row, t)` is evaluated at `t = i / (n - 1)` for each of the `n` points
/// of a row (`t = 0` for single-point rows), so every row spans the same
/// `[0, 1]` interval regardless of its point count.
pub fn create_quasi_regular_field(parallels: &[u32], f: impl Fn(usize, f64) -> f32) -> Vec<f32> {
    let total: usize = parallels.iter().map(|&n| n as usize).sum();
    let mut data = Vec::with_capacity(total);
    for (row, &n) in parallels.iter().enumerate() {
        let n = n as usize;
        for i in 0..n {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            data.push(f(row, t));
        }
    }
    data
}
