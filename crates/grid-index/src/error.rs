//! Error types for the grid index crate.

use thiserror::Error;

/// Errors that can occur while building an index or loading its configuration.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Index already finished; cannot add {0}")]
    Finished(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
