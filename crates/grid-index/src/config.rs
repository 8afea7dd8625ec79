//! Interval filter configuration.
//!
//! Mirrors the collection configuration attributes (`intvLength`,
//! `excludeZero`, `id`, `prob`) as a YAML document:
//!
//! ```yaml
//! exclude_zero: true
//! variables:
//!   - intv_length: 12
//!     id: "0-1-8"
//!     prob: "50800"
//! ```

use crate::error::Result;
use crate::interval::IntervalFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One `variable` entry of the filter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalVariable {
    /// Interval length to keep
    pub intv_length: i32,
    /// Dash separated parameter id
    pub id: String,
    /// Probability constraint
    #[serde(default)]
    pub prob: Option<String>,
}

/// Interval filter configuration.
///
/// Zero-length intervals are excluded unless `exclude_zero: false` is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalFilterConfig {
    #[serde(default = "default_exclude_zero")]
    pub exclude_zero: bool,
    #[serde(default)]
    pub variables: Vec<IntervalVariable>,
}

fn default_exclude_zero() -> bool {
    true
}

impl Default for IntervalFilterConfig {
    fn default() -> Self {
        Self {
            exclude_zero: default_exclude_zero(),
            variables: Vec::new(),
        }
    }
}

impl IntervalFilterConfig {
    /// Parse from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        debug!(path = ?path, variables = config.variables.len(), "Loaded interval filter config");
        Ok(config)
    }

    /// Build the filter, applying the same drop-and-log rules as
    /// [`IntervalFilter::add_variable`].
    pub fn build(&self) -> IntervalFilter {
        let mut filter = IntervalFilter::new();
        filter.set_exclude_zero(self.exclude_zero);
        for v in &self.variables {
            filter.add_variable(v.intv_length, &v.id, v.prob.as_deref());
        }
        debug!(
            configured = self.variables.len(),
            rules = filter.rules().len(),
            exclude_zero = filter.exclude_zero(),
            "Built interval filter"
        );
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntervalFilterConfig::from_yaml_str("{}").unwrap();
        assert!(config.exclude_zero);
        assert_eq!(config, IntervalFilterConfig::default());
        assert!(config.variables.is_empty());
        assert!(config.build().is_empty());
    }

    #[test]
    fn test_prob_is_optional() {
        let config = IntervalFilterConfig::from_yaml_str(
            "variables:\n  - intv_length: 3\n    id: \"0-1-8\"\n",
        )
        .unwrap();
        assert_eq!(config.variables[0].prob, None);
        assert_eq!(config.build().rules()[0].probability, None);
    }
}
