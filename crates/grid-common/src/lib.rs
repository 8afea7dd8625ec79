//! Common types shared across the grid indexing crates.
//!
//! These are plain value types produced by format decoders and consumed by
//! the index and dataset layers. Nothing here owns global state.

pub mod level;
pub mod parameter;
pub mod record;

pub use level::{LevelType, MISSING_LEVEL_TYPE};
pub use parameter::GridParameter;
pub use record::GridRecord;
