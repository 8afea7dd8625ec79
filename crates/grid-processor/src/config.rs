//! Configuration for quasi-regular resampling.

use crate::error::{GridProcessorError, Result};
use crate::spline::{self, NATURAL_BOUNDARY};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Boundary conditions of the per-row spline.
///
/// A derivative above `0.99e30` selects the natural boundary (zero second
/// derivative) at that end of the row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuasiRegularConfig {
    /// First derivative at the first point of each row.
    #[serde(default = "natural_boundary")]
    pub start_derivative: f64,

    /// First derivative at the last point of each row.
    #[serde(default = "natural_boundary")]
    pub end_derivative: f64,
}

fn natural_boundary() -> f64 {
    NATURAL_BOUNDARY
}

fn derivative_from_env(var: &str) -> Option<f64> {
    let val = std::env::var(var).ok()?;
    match val.trim().parse() {
        Ok(d) => Some(d),
        Err(e) => {
            warn!(var, value = %val, error = %e, "Ignoring invalid boundary derivative");
            None
        }
    }
}

impl Default for QuasiRegularConfig {
    fn default() -> Self {
        Self {
            start_derivative: NATURAL_BOUNDARY,
            end_derivative: NATURAL_BOUNDARY,
        }
    }
}

impl QuasiRegularConfig {
    /// Build from the environment, falling back to natural boundaries.
    ///
    /// `QUASI_START_DERIVATIVE` and `QUASI_END_DERIVATIVE` override the
    /// defaults; unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(d) = derivative_from_env("QUASI_START_DERIVATIVE") {
            config.start_derivative = d;
        }

        if let Some(d) = derivative_from_env("QUASI_END_DERIVATIVE") {
            config.end_derivative = d;
        }

        config
    }

    /// Reject NaN boundary derivatives.
    pub fn validate(&self) -> Result<()> {
        if self.start_derivative.is_nan() || self.end_derivative.is_nan() {
            return Err(GridProcessorError::config_error(
                "boundary derivatives must not be NaN",
            ));
        }
        Ok(())
    }

    /// True when both ends use the natural boundary.
    pub fn is_natural(&self) -> bool {
        spline::is_natural(self.start_derivative) && spline::is_natural(self.end_derivative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_natural() {
        let config = QuasiRegularConfig::default();
        assert!(config.is_natural());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let config = QuasiRegularConfig {
            start_derivative: f64::NAN,
            end_derivative: NATURAL_BOUNDARY,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides_and_ignores_garbage() {
        std::env::set_var("QUASI_START_DERIVATIVE", "0.25");
        std::env::set_var("QUASI_END_DERIVATIVE", "steep");

        let config = QuasiRegularConfig::from_env();

        std::env::remove_var("QUASI_START_DERIVATIVE");
        std::env::remove_var("QUASI_END_DERIVATIVE");

        assert_eq!(config.start_derivative, 0.25);
        assert_eq!(config.end_derivative, NATURAL_BOUNDARY);
        assert!(!config.is_natural());
    }

    #[test]
    fn test_clamped_is_not_natural() {
        let config = QuasiRegularConfig {
            start_derivative: 0.0,
            end_derivative: NATURAL_BOUNDARY,
        };
        assert!(!config.is_natural());
    }
}
