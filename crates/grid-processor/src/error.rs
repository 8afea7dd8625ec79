//! Errors raised by the checked resampling entry points.

use thiserror::Error;

/// Failure of a grid transform or its configuration.
#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// Row counts and sample data disagree.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Boundary settings that cannot be used.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl GridProcessorError {
    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create a ConfigError.
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Result alias used across this crate.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
