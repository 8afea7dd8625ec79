//! Index metadata for one decoded field.

use crate::level::LevelType;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Index entry for a single decoded GRIB/GEMPAK/McIDAS field.
///
/// Carries no data payload. The grid definition is referenced by its id
/// (the `GDS_KEY` of a definition held by the same index), never embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    /// Value of the first fixed surface
    pub level1: f64,
    /// Value of the second fixed surface (layers only)
    pub level2: f64,
    /// Type code of the first fixed surface
    pub level_type1: i32,
    /// Type code of the second fixed surface
    pub level_type2: i32,
    /// Model run / analysis time
    pub reference_time: DateTime<Utc>,
    /// Time the field is valid for
    pub valid_time: DateTime<Utc>,
    /// Offset of the valid time from the reference time, in the decoder's time unit
    pub valid_time_offset: i32,
    /// Parameter short name
    pub parameter_name: String,
    /// Id of the owning grid definition
    pub grid_definition_id: String,
    /// Decimal scale factor used when packing the field
    pub decimal_scale: i32,
}

impl GridRecord {
    /// Create a record at a single surface with hourly offset semantics.
    ///
    /// The second surface is marked missing and `valid_time` is derived from
    /// `reference_time + valid_time_offset` hours.
    pub fn new(
        parameter_name: impl Into<String>,
        grid_definition_id: impl Into<String>,
        reference_time: DateTime<Utc>,
        valid_time_offset: i32,
        level_type1: i32,
        level1: f64,
    ) -> Self {
        Self {
            level1,
            level2: 0.0,
            level_type1,
            level_type2: crate::MISSING_LEVEL_TYPE,
            reference_time,
            valid_time: reference_time + Duration::hours(valid_time_offset as i64),
            valid_time_offset,
            parameter_name: parameter_name.into(),
            grid_definition_id: grid_definition_id.into(),
            decimal_scale: 0,
        }
    }

    /// Set the second fixed surface, turning the record into a layer.
    pub fn with_level2(mut self, level_type2: i32, level2: f64) -> Self {
        self.level_type2 = level_type2;
        self.level2 = level2;
        self
    }

    /// Set the packing decimal scale.
    pub fn with_decimal_scale(mut self, decimal_scale: i32) -> Self {
        self.decimal_scale = decimal_scale;
        self
    }

    /// Override the valid time (e.g., for non-hourly time units).
    pub fn with_valid_time(mut self, valid_time: DateTime<Utc>) -> Self {
        self.valid_time = valid_time;
        self
    }

    pub fn first_level(&self) -> LevelType {
        LevelType::new(self.level_type1, self.level1)
    }

    pub fn second_level(&self) -> LevelType {
        LevelType::new(self.level_type2, self.level2)
    }

    /// True when the record spans two surfaces.
    pub fn is_layer(&self) -> bool {
        !self.second_level().is_missing()
    }

    /// Whole hours between reference and valid time.
    pub fn forecast_hours(&self) -> i64 {
        (self.valid_time - self.reference_time).num_hours()
    }
}
