//! Test helpers shared by the grid index and processor crates.
//!
//! - `assert_approx_eq!` / `assert_slice_approx_eq!` for resampled values
//! - reduced (quasi-regular) grid generators in [`generators`]
//! - `GridRecord` fixtures in [`fixtures`]
//!
//! Pulled in as a dev-dependency only:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Assert two scalars differ by at most `tol`. Both sides are widened to
/// `f64`; a NaN on either side always fails.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(resampled[3], 0.6875, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let actual = $actual as f64;
        let expected = $expected as f64;
        let tol = $tol as f64;
        let delta = (actual - expected).abs();
        if !(delta <= tol) {
            panic!(
                "values not within tolerance: {:?} vs {:?} (|delta| = {:?}, tol = {:?})",
                actual, expected, delta, tol
            );
        }
    }};
}

/// Element-wise `assert_approx_eq!` over two slices of equal length,
/// reporting the first offending index.
#[macro_export]
macro_rules! assert_slice_approx_eq {
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let actual = $actual;
        let expected = $expected;
        let tol = $tol as f64;
        assert_eq!(actual.len(), expected.len(), "slice lengths differ");
        for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            let delta = (*a as f64 - *e as f64).abs();
            if !(delta <= tol) {
                panic!(
                    "values differ at index {}: {:?} vs {:?} (|delta| = {:?}, tol = {:?})",
                    i, a, e, delta, tol
                );
            }
        }
    }};
}
