//! Semantic descriptor of a physical field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical parameter such as temperature or accumulated precipitation.
///
/// Value object: two parameters are the same parameter when all four fields
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridParameter {
    /// Table number of the parameter within its category
    pub number: i32,
    /// Short name (e.g., "TMP", "APCP")
    pub name: String,
    /// Long description (e.g., "Temperature")
    pub description: String,
    /// Unit string (e.g., "K", "kg m-2")
    pub unit: String,
}

impl GridParameter {
    pub fn new(
        number: i32,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            description: description.into(),
            unit: unit.into(),
        }
    }

    /// Placeholder used by lookups when a record names an unknown parameter.
    pub fn unknown(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            number: -1,
            description: format!("Unknown parameter {}", name),
            name,
            unit: String::new(),
        }
    }

    /// Returns true if this is the placeholder produced by [`GridParameter::unknown`].
    pub fn is_unknown(&self) -> bool {
        self.number < 0
    }
}

impl fmt::Display for GridParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{} ({})", self.name, self.description)
        } else {
            write!(f, "{} ({}) [{}]", self.name, self.description, self.unit)
        }
    }
}
