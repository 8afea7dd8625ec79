//! Cubic spline on unit-spaced samples.

/// Derivative value requesting a natural boundary.
pub const NATURAL_BOUNDARY: f64 = 1.0e30;

/// Derivatives above this are treated as [`NATURAL_BOUNDARY`].
pub const NATURAL_THRESHOLD: f64 = 0.99e30;

pub(crate) fn is_natural(derivative: f64) -> bool {
    derivative > NATURAL_THRESHOLD
}

/// Second derivatives of the cubic spline through `y[i]` at `x = i`.
///
/// `start` and `end` are the first derivatives at the two ends; values above
/// [`NATURAL_THRESHOLD`] give a zero second derivative there instead. Rows
/// with fewer than two points have all-zero second derivatives.
pub fn second_derivatives(y: &[f64], start: f64, end: f64) -> Vec<f64> {
    let n = y.len();
    let mut y2 = vec![0.0; n];
    if n < 2 {
        return y2;
    }
    let mut u = vec![0.0; n - 1];

    if !is_natural(start) {
        y2[0] = -0.5;
        u[0] = 3.0 * ((y[1] - y[0]) - start);
    }

    // Tridiagonal decomposition; with unit spacing sig is always 1/2.
    let sig = 0.5;
    for i in 1..n - 1 {
        let p = sig * y2[i - 1] + 2.0;
        y2[i] = (sig - 1.0) / p;
        let curvature = (y[i + 1] - y[i]) - (y[i] - y[i - 1]);
        u[i] = (3.0 * curvature - sig * u[i - 1]) / p;
    }

    let (qn, un) = if is_natural(end) {
        (0.0, 0.0)
    } else {
        (0.5, 3.0 * (end - (y[n - 1] - y[n - 2])))
    };
    y2[n - 1] = (un - qn * u[n - 2]) / (qn * y2[n - 2] + 1.0);

    // Back substitution
    for k in (0..n - 1).rev() {
        y2[k] = y2[k] * y2[k + 1] + u[k];
    }
    y2
}

/// Evaluate the spline between `low = floor(x)` and `hi = ceil(x)`.
///
/// Callers handle integral `x` themselves so that input samples pass
/// through untouched.
pub fn evaluate(y: &[f64], y2: &[f64], x: f64) -> f64 {
    let low = x.floor() as usize;
    let hi = x.ceil() as usize;
    let a = hi as f64 - x;
    let b = x - low as f64;
    a * y[low] + b * y[hi] + ((a * a * a - a) * y2[low] + (b * b * b - b) * y2[hi]) / 6.0
}
