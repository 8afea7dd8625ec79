//! Resampling of quasi-regular (reduced) grids onto a full rectangle.
//!
//! A reduced grid stores each parallel with its own number of points,
//! typically fewer towards the poles. Every row is fitted with a cubic
//! spline over its own points and sampled at `ni` evenly spaced positions,
//! so that the first and last output columns land on the first and last
//! input points of the row.

use crate::config::QuasiRegularConfig;
use crate::error::{GridProcessorError, Result};
use crate::spline;
use tracing::{debug, warn};

/// Total number of samples described by `parallels`.
pub fn expected_len(parallels: &[u32]) -> usize {
    parallels.iter().map(|&n| n as usize).sum()
}

/// Row-by-row spline resampler.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuasiRegular {
    config: QuasiRegularConfig,
}

impl QuasiRegular {
    pub fn new(config: QuasiRegularConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuasiRegularConfig {
        &self.config
    }

    /// Resample `quasi` into an `ni * nj` row-major grid.
    ///
    /// # Arguments
    /// * `quasi` - All rows concatenated, row `j` holding `parallels[j]` points
    /// * `parallels` - Point count of each row
    /// * `ni` - Output row width
    /// * `nj` - Number of rows
    ///
    /// Rows whose point count equals `ni` are copied verbatim. Rows with no
    /// points come out as NaN.
    ///
    /// # Panics
    /// The caller guarantees `parallels.len() >= nj` and that `quasi` holds
    /// at least the first `nj` rows. Use [`QuasiRegular::resample_checked`]
    /// when that is not already known.
    pub fn resample(&self, quasi: &[f32], parallels: &[u32], ni: usize, nj: usize) -> Vec<f32> {
        let mut data = vec![f32::NAN; ni * nj];
        if ni == 0 {
            return data;
        }

        let mut offset = 0;
        for (j, out) in data.chunks_exact_mut(ni).enumerate() {
            let npoints = parallels[j] as usize;
            let row = &quasi[offset..offset + npoints];
            offset += npoints;
            self.resample_row(row, out);
        }

        debug!(ni = ni, nj = nj, samples = offset, "Resampled quasi-regular grid");
        data
    }

    /// Like [`QuasiRegular::resample`], but validates the row table first.
    pub fn resample_checked(
        &self,
        quasi: &[f32],
        parallels: &[u32],
        ni: usize,
        nj: usize,
    ) -> Result<Vec<f32>> {
        if parallels.len() != nj {
            return Err(GridProcessorError::invalid_grid(format!(
                "{} parallels given for {} rows",
                parallels.len(),
                nj
            )));
        }
        let expected = expected_len(parallels);
        if expected != quasi.len() {
            return Err(GridProcessorError::invalid_grid(format!(
                "parallels describe {} samples but {} were supplied",
                expected,
                quasi.len()
            )));
        }
        Ok(self.resample(quasi, parallels, ni, nj))
    }

    fn resample_row(&self, row: &[f32], out: &mut [f32]) {
        let ni = out.len();
        let npoints = row.len();

        if npoints == ni {
            out.copy_from_slice(row);
            return;
        }
        if npoints == 0 {
            warn!(ni = ni, "Empty row in quasi-regular grid");
            return;
        }

        let y: Vec<f64> = row.iter().map(|&v| v as f64).collect();
        let y2 = spline::second_derivatives(
            &y,
            self.config.start_derivative,
            self.config.end_derivative,
        );

        let last = (npoints - 1) as f64;
        for (i, value) in out.iter_mut().enumerate() {
            let x = if ni > 1 {
                i as f64 / (ni - 1) as f64 * last
            } else {
                0.0
            };

            *value = if x.fract() == 0.0 {
                row[x as usize]
            } else {
                spline::evaluate(&y, &y2, x) as f32
            };
        }
    }
}

/// Resample with natural boundaries at both ends of every row.
pub fn resample_quasi_regular(quasi: &[f32], parallels: &[u32], ni: usize, nj: usize) -> Vec<f32> {
    QuasiRegular::default().resample(quasi, parallels, ni, nj)
}
