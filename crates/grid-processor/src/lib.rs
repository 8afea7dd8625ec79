//! Numeric processing of decoded grid fields.
//!
//! Currently this is the quasi-regular resampler, which turns reduced-row
//! data into a full rectangle right after decode so downstream code only
//! ever sees rectangular grids.
//!
//! # Example
//!
//! ```
//! use grid_processor::resample_quasi_regular;
//!
//! // Two rows, the first reduced to 2 points, resampled to width 3
//! let quasi = [0.0, 2.0, 5.0, 6.0, 7.0];
//! let data = resample_quasi_regular(&quasi, &[2, 3], 3, 2);
//! assert_eq!(data.len(), 6);
//! assert_eq!(&data[3..], &[5.0, 6.0, 7.0]);
//! ```

pub mod config;
pub mod error;
pub mod quasi_regular;
pub mod spline;

pub use config::QuasiRegularConfig;
pub use error::{GridProcessorError, Result};
pub use quasi_regular::{expected_len, resample_quasi_regular, QuasiRegular};
pub use spline::{NATURAL_BOUNDARY, NATURAL_THRESHOLD};
