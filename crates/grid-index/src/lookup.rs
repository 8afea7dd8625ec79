//! Table lookup contract between format adapters and the dataset layer.

use crate::definition::GridDefinition;
use crate::projection::ProjectionType;
use grid_common::{GridParameter, GridRecord};

/// Missing-value marker written into unpacked grids.
pub const MISSING_VALUE: f32 = -9999.0;

/// Maps records and grid definitions to human-facing semantics.
///
/// Implementations are format-specific adapters. They hold no mutable state
/// and may be shared across threads.
pub trait GridTableLookup: Send + Sync {
    /// Parameter described by the record's parameter name.
    fn parameter(&self, record: &GridRecord) -> GridParameter;

    /// Short name of the record's first level type (e.g., "isobaric").
    fn level_name(&self, record: &GridRecord) -> String;

    /// Long description of the record's first level.
    fn level_description(&self, record: &GridRecord) -> String;

    /// Unit of the record's level values.
    fn level_unit(&self, record: &GridRecord) -> String;

    fn discipline_name(&self, record: &GridRecord) -> String;

    fn category_name(&self, record: &GridRecord) -> String;

    fn grid_name(&self, gds: &GridDefinition) -> String;

    /// Description of the earth figure.
    fn shape_name(&self, gds: &GridDefinition) -> String;

    /// Projection kind, `None` for a regular lat/lon grid.
    fn projection_type(&self, gds: &GridDefinition) -> Option<ProjectionType>;

    fn is_lat_lon(&self, gds: &GridDefinition) -> bool;

    /// True when the record's level forms a vertical coordinate.
    fn is_vertical_coordinate(&self, record: &GridRecord) -> bool;

    fn is_positive_up(&self, record: &GridRecord) -> bool;

    /// True when the record spans two surfaces.
    fn is_layer(&self, record: &GridRecord) -> bool;

    fn title(&self) -> String;

    fn institution(&self) -> String;

    fn source(&self) -> String;

    fn comment(&self) -> Option<String>;

    fn missing_value(&self) -> f32 {
        MISSING_VALUE
    }
}
