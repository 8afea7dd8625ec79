//! Format-independent grid metadata index.
//!
//! Format decoders (GRIB1, GRIB2, GEMPAK, McIDAS) feed this crate with
//! decoded records and grid definition sections. It provides:
//!
//! - [`GridDefinition`]: typed parameter bag for one horizontal grid, with
//!   tolerant structural comparison
//! - [`GridIndex`]: records, definitions and global attributes of one scan
//! - [`GridTableLookup`]: contract for mapping records to parameter, level
//!   and projection semantics, with a table-driven [`TableLookup`]
//! - [`IntervalFilter`]: per-parameter accumulation interval selection
//!
//! # Scan flow
//!
//! ```text
//! decoder ──► IntervalFilter::filter_ok ──► GridIndex::add_grid_record
//!    │
//!    └──► GridDefinition::from_gds ──► GridIndex::add_horiz_coord_sys
//!
//! GridIndex::finish() ──► read-only, shared with the dataset layer
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod gds;
pub mod index;
pub mod interval;
pub mod lookup;
pub mod projection;
pub mod tables;

pub use config::{IntervalFilterConfig, IntervalVariable};
pub use definition::{keys, GridDefinition, GridFormat, ParamValue, CLOSE_ENOUGH, UNDEFINED};
pub use error::{IndexError, Result};
pub use gds::{EarthShape, GdsCommon, GdsProjection, GdsVariables};
pub use index::GridIndex;
pub use interval::{
    pack_center_id, pack_discipline_id, parse_packed_id, IntervalFilter, IntervalRule,
};
pub use lookup::{GridTableLookup, MISSING_VALUE};
pub use projection::ProjectionType;
pub use tables::{DatasetMetadata, LevelDescription, LevelEntry, ParameterEntry, TableLookup};
