//! Per-source index of records and grid definitions.

use crate::definition::GridDefinition;
use crate::error::{IndexError, Result};
use grid_common::GridRecord;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Records, grid definitions and global attributes collected from one
/// scanned source.
///
/// Built by the single thread scanning the source, then read-only after
/// [`GridIndex::finish`]. Records keep decode order.
#[derive(Debug, Clone, Default)]
pub struct GridIndex {
    records: Vec<GridRecord>,
    definitions: Vec<GridDefinition>,
    global_attributes: HashMap<String, String>,
    finished: bool,
}

impl GridIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoded record.
    pub fn add_grid_record(&mut self, record: GridRecord) -> Result<()> {
        self.check_open("grid record")?;
        self.records.push(record);
        Ok(())
    }

    /// Append a distinct horizontal coordinate system.
    pub fn add_horiz_coord_sys(&mut self, definition: GridDefinition) -> Result<()> {
        self.check_open("grid definition")?;
        self.definitions.push(definition);
        Ok(())
    }

    /// Set a global attribute, replacing any previous value.
    pub fn add_global_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.check_open("global attribute")?;
        self.global_attributes.insert(name.into(), value.into());
        Ok(())
    }

    fn check_open(&self, what: &'static str) -> Result<()> {
        if self.finished {
            warn!(what, "Rejected mutation of a finished grid index");
            return Err(IndexError::Finished(what));
        }
        Ok(())
    }

    /// Mark the scan complete.
    ///
    /// With exactly two definitions the pair is compared and the outcome
    /// only logged; definitions are never merged. Calling this more than
    /// once has no further effect.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        if let [first, second] = self.definitions.as_slice() {
            let same = GridDefinition::compare(first, second);
            debug!(
                first = first.id().unwrap_or("?"),
                second = second.id().unwrap_or("?"),
                same,
                "Compared grid definitions"
            );
        }
        self.finished = true;
        debug!(
            records = self.records.len(),
            definitions = self.definitions.len(),
            attributes = self.global_attributes.len(),
            "Finished grid index"
        );
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn grid_records(&self) -> &[GridRecord] {
        &self.records
    }

    pub fn horiz_coord_sys(&self) -> &[GridDefinition] {
        &self.definitions
    }

    pub fn global_attributes(&self) -> &HashMap<String, String> {
        &self.global_attributes
    }

    pub fn global_attribute(&self, name: &str) -> Option<&str> {
        self.global_attributes.get(name).map(String::as_str)
    }

    /// Number of records.
    pub fn grid_count(&self) -> usize {
        self.records.len()
    }

    /// Definition whose `GDSkey` string equals `id`.
    pub fn definition(&self, id: &str) -> Option<&GridDefinition> {
        self.definitions.iter().find(|d| d.id() == Some(id))
    }

    /// Records on the given definition, in decode order.
    pub fn records_for_definition<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a GridRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.grid_definition_id == id)
    }

    /// Distinct parameter names in order of first appearance.
    pub fn parameter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.parameter_name.as_str()) {
                names.push(&record.parameter_name);
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{keys, GridFormat};
    use chrono::{TimeZone, Utc};

    fn record(param: &str, gds: &str) -> GridRecord {
        let run = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        GridRecord::new(param, gds, run, 0, 1, 0.0)
    }

    #[test]
    fn test_empty_index() {
        let mut index = GridIndex::new();
        index.finish();
        assert_eq!(index.grid_count(), 0);
        assert!(index.horiz_coord_sys().is_empty());
        assert!(index.is_finished());
    }

    #[test]
    fn test_records_keep_decode_order() {
        let mut index = GridIndex::new();
        for p in ["VGRD", "TMP", "UGRD", "TMP"] {
            index.add_grid_record(record(p, "1")).unwrap();
        }
        let names: Vec<_> = index
            .grid_records()
            .iter()
            .map(|r| r.parameter_name.as_str())
            .collect();
        assert_eq!(names, ["VGRD", "TMP", "UGRD", "TMP"]);
        assert_eq!(index.parameter_names(), ["VGRD", "TMP", "UGRD"]);
    }

    #[test]
    fn test_mutation_after_finish_is_rejected() {
        let mut index = GridIndex::new();
        index.finish();
        assert!(matches!(
            index.add_grid_record(record("TMP", "1")),
            Err(IndexError::Finished(_))
        ));
        assert!(index.add_global_attribute("a", "b").is_err());
        assert!(index
            .add_horiz_coord_sys(GridDefinition::new(GridFormat::Grib2))
            .is_err());
    }

    #[test]
    fn test_definition_lookup() {
        let mut index = GridIndex::new();
        let mut d = GridDefinition::new(GridFormat::Grib2);
        d.add_param(keys::GDS_KEY, 42);
        index.add_horiz_coord_sys(d).unwrap();
        index.add_grid_record(record("TMP", "42")).unwrap();
        index.add_grid_record(record("TMP", "7")).unwrap();

        assert!(index.definition("42").is_some());
        assert!(index.definition("7").is_none());
        assert_eq!(index.records_for_definition("42").count(), 1);
    }
}
