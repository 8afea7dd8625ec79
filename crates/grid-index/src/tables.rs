//! Table-driven implementation of [`GridTableLookup`].
//!
//! Tables are built in code or from a YAML document so that parameter and
//! level mappings can change without code changes:
//!
//! ```yaml
//! title: GFS 0.25 degree
//! institution: NCEP
//! source: Global Forecast System
//! parameters:
//!   - name: TMP
//!     description: Temperature
//!     units: K
//!     grib2: { discipline: 0, category: 0, number: 0 }
//!     levels:
//!       - level_code: 100
//!         name: isobaric
//!         display: "{value_mb} mb"
//!         units: Pa
//!         vertical: true
//!         positive: down
//! ```

use crate::definition::{keys, GridDefinition};
use crate::error::{IndexError, Result};
use crate::lookup::GridTableLookup;
use crate::projection::ProjectionType;
use grid_common::{GridParameter, GridRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Level description, either static text or a template.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelDescription {
    /// Static description (e.g., "surface", "mean sea level")
    Static(String),
    /// Template with `{value}` or `{value_mb}` placeholders
    Template(String),
}

impl LevelDescription {
    /// Build from display text, detecting placeholders.
    pub fn from_display(text: &str) -> Self {
        if text.contains("{value") {
            LevelDescription::Template(text.to_string())
        } else {
            LevelDescription::Static(text.to_string())
        }
    }

    /// Format the description for a level value.
    ///
    /// - `{value}` - raw level value
    /// - `{value_mb}` - value converted from Pa to mb
    pub fn format(&self, value: f64) -> String {
        match self {
            LevelDescription::Static(s) => s.clone(),
            LevelDescription::Template(t) => t
                .replace("{value_mb}", &format_level(value / 100.0))
                .replace("{value}", &format_level(value)),
        }
    }
}

fn format_level(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parameter with its table context.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub parameter: GridParameter,
    pub discipline: String,
    pub category: String,
}

/// Semantics of one level type code.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelEntry {
    pub name: String,
    pub description: LevelDescription,
    pub unit: String,
    pub vertical: bool,
    pub positive_up: bool,
}

impl LevelEntry {
    /// A single-surface level with no vertical coordinate.
    pub fn surface(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: LevelDescription::Static(description.into()),
            unit: String::new(),
            vertical: false,
            positive_up: true,
        }
    }

    /// A level type that forms a vertical coordinate.
    pub fn vertical(
        name: impl Into<String>,
        template: &str,
        unit: impl Into<String>,
        positive_up: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: LevelDescription::from_display(template),
            unit: unit.into(),
            vertical: true,
            positive_up,
        }
    }
}

/// CF global metadata for a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetMetadata {
    pub title: String,
    pub institution: String,
    pub source: String,
    pub comment: Option<String>,
}

/// GRIB2 discipline names (Code Table 0.0).
pub fn discipline_name(discipline: u8) -> String {
    match discipline {
        0 => "Meteorological products".to_string(),
        1 => "Hydrological products".to_string(),
        2 => "Land surface products".to_string(),
        3 => "Satellite remote sensing products".to_string(),
        4 => "Space weather products".to_string(),
        10 => "Oceanographic products".to_string(),
        209 => "Local use (MRMS)".to_string(),
        d => format!("Unknown discipline {}", d),
    }
}

/// Immutable parameter and level tables.
#[derive(Debug, Clone, Default)]
pub struct TableLookup {
    /// parameter short name -> parameter entry
    parameters: HashMap<String, ParameterEntry>,
    /// level type code -> level entry
    levels: HashMap<i32, LevelEntry>,
    metadata: DatasetMetadata,
}

impl TableLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter mapping; the first mapping for a name wins.
    pub fn add_parameter(
        &mut self,
        parameter: GridParameter,
        discipline: impl Into<String>,
        category: impl Into<String>,
    ) {
        self.parameters
            .entry(parameter.name.clone())
            .or_insert_with(|| ParameterEntry {
                parameter,
                discipline: discipline.into(),
                category: category.into(),
            });
    }

    /// Add a level mapping; the first mapping for a code wins.
    pub fn add_level(&mut self, level_type: i32, entry: LevelEntry) {
        self.levels.entry(level_type).or_insert(entry);
    }

    pub fn set_metadata(&mut self, metadata: DatasetMetadata) {
        self.metadata = metadata;
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.levels.is_empty()
    }

    /// Load tables from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let tables = Self::from_yaml_str(&contents)?;
        debug!(
            path = ?path,
            parameters = tables.parameter_count(),
            levels = tables.level_count(),
            "Loaded lookup tables"
        );
        Ok(tables)
    }

    /// Parse tables from a YAML document.
    ///
    /// Parameters without a `name` or with GRIB2 codes out of range, and
    /// levels without a `level_code`, are skipped. A document without a
    /// `parameters` sequence is an error.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let doc: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let mut tables = TableLookup::new();

        let text = |key: &str| {
            doc.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        tables.set_metadata(DatasetMetadata {
            title: text("title"),
            institution: text("institution"),
            source: text("source"),
            comment: doc
                .get("comment")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        });

        let parameters = doc
            .get("parameters")
            .and_then(|p| p.as_sequence())
            .ok_or_else(|| IndexError::InvalidConfig("missing 'parameters' section".into()))?;

        for param in parameters {
            let name = match param.get("name").and_then(|n| n.as_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };
            let field = |key: &str| {
                param
                    .get(key)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            };

            let grib2 = param.get("grib2");
            let code = |key: &str| {
                grib2
                    .and_then(|g| g.get(key))
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0)
            };
            let (Ok(discipline), Ok(number)) =
                (u8::try_from(code("discipline")), i32::try_from(code("number")))
            else {
                warn!(
                    name = %name,
                    discipline = code("discipline"),
                    number = code("number"),
                    "Skipping parameter with out-of-range GRIB2 codes"
                );
                continue;
            };
            let category = code("category");

            let description = field("description").unwrap_or_else(|| name.clone());
            let unit = field("units").unwrap_or_default();
            tables.add_parameter(
                GridParameter::new(number, name.clone(), description, unit),
                field("discipline_name").unwrap_or_else(|| discipline_name(discipline)),
                field("category_name").unwrap_or_else(|| format!("Category {}", category)),
            );

            let Some(levels) = param.get("levels").and_then(|l| l.as_sequence()) else {
                continue;
            };
            for level in levels {
                let Some(level_code) = level.get("level_code").and_then(|v| v.as_i64()) else {
                    continue;
                };
                let level_field = |key: &str| level.get(key).and_then(|v| v.as_str());
                let display = level_field("display")
                    .or_else(|| level_field("display_template"))
                    .unwrap_or("");
                tables.add_level(
                    level_code as i32,
                    LevelEntry {
                        name: level_field("name")
                            .map(str::to_string)
                            .unwrap_or_else(|| format!("level_type_{}", level_code)),
                        description: LevelDescription::from_display(display),
                        unit: level_field("units").unwrap_or_default().to_string(),
                        vertical: level
                            .get("vertical")
                            .and_then(|v| v.as_bool())
                            .unwrap_or(false),
                        positive_up: level_field("positive") != Some("down"),
                    },
                );
            }
        }

        Ok(tables)
    }

    fn level(&self, record: &GridRecord) -> Option<&LevelEntry> {
        self.levels.get(&record.level_type1)
    }
}

impl GridTableLookup for TableLookup {
    fn parameter(&self, record: &GridRecord) -> GridParameter {
        self.parameters
            .get(&record.parameter_name)
            .map(|e| e.parameter.clone())
            .unwrap_or_else(|| GridParameter::unknown(&record.parameter_name))
    }

    fn level_name(&self, record: &GridRecord) -> String {
        self.level(record)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| format!("level_type_{}", record.level_type1))
    }

    fn level_description(&self, record: &GridRecord) -> String {
        match self.level(record) {
            Some(l) => l.description.format(record.level1),
            None => format!(
                "Level type {} value {}",
                record.level_type1,
                format_level(record.level1)
            ),
        }
    }

    fn level_unit(&self, record: &GridRecord) -> String {
        self.level(record)
            .map(|l| l.unit.clone())
            .unwrap_or_default()
    }

    fn discipline_name(&self, record: &GridRecord) -> String {
        self.parameters
            .get(&record.parameter_name)
            .map(|e| e.discipline.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn category_name(&self, record: &GridRecord) -> String {
        self.parameters
            .get(&record.parameter_name)
            .map(|e| e.category.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn grid_name(&self, gds: &GridDefinition) -> String {
        if let Some(raw) = gds.gds() {
            return raw.grid_name().to_string();
        }
        gds.get_param(keys::GRID_NAME)
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.projection_type(gds)
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "Latitude/Longitude".to_string())
            })
    }

    fn shape_name(&self, gds: &GridDefinition) -> String {
        gds.get_param(keys::GRID_SHAPE)
            .unwrap_or("spherical")
            .to_string()
    }

    fn projection_type(&self, gds: &GridDefinition) -> Option<ProjectionType> {
        gds.projection_type()
    }

    fn is_lat_lon(&self, gds: &GridDefinition) -> bool {
        match gds.gds() {
            Some(raw) => raw.is_lat_lon(),
            None => matches!(
                self.projection_type(gds),
                None | Some(ProjectionType::GaussianLatLon)
            ),
        }
    }

    fn is_vertical_coordinate(&self, record: &GridRecord) -> bool {
        self.level(record).is_some_and(|l| l.vertical)
    }

    fn is_positive_up(&self, record: &GridRecord) -> bool {
        self.level(record).map_or(true, |l| l.positive_up)
    }

    fn is_layer(&self, record: &GridRecord) -> bool {
        record.is_layer()
    }

    fn title(&self) -> String {
        self.metadata.title.clone()
    }

    fn institution(&self) -> String {
        self.metadata.institution.clone()
    }

    fn source(&self) -> String {
        self.metadata.source.clone()
    }

    fn comment(&self) -> Option<String> {
        self.metadata.comment.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_template_description() {
        let d = LevelDescription::from_display("{value_mb} mb");
        assert_eq!(d.format(50000.0), "500 mb");

        let d = LevelDescription::from_display("{value} m above ground");
        assert_eq!(d.format(2.0), "2 m above ground");
        assert_eq!(d.format(0.5), "0.5 m above ground");
    }

    #[test]
    fn test_level_static_description() {
        let d = LevelDescription::from_display("mean sea level");
        assert_eq!(d, LevelDescription::Static("mean sea level".to_string()));
        assert_eq!(d.format(123.0), "mean sea level");
    }

    #[test]
    fn test_first_mapping_wins() {
        let mut tables = TableLookup::new();
        tables.add_parameter(GridParameter::new(0, "TMP", "Temperature", "K"), "d", "c");
        tables.add_parameter(GridParameter::new(1, "TMP", "Other", "C"), "d", "c");
        tables.add_level(1, LevelEntry::surface("surface", "surface"));
        tables.add_level(1, LevelEntry::surface("other", "other"));

        assert_eq!(tables.parameter_count(), 1);
        assert_eq!(tables.level_count(), 1);
        assert_eq!(tables.parameters["TMP"].parameter.unit, "K");
        assert_eq!(tables.levels[&1].name, "surface");
    }

    #[test]
    fn test_discipline_names() {
        assert_eq!(discipline_name(0), "Meteorological products");
        assert_eq!(discipline_name(77), "Unknown discipline 77");
    }

    #[test]
    fn test_yaml_requires_parameters() {
        assert!(matches!(
            TableLookup::from_yaml_str("title: x\n"),
            Err(IndexError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableLookup::from_yaml_str("parameters: [unclosed"),
            Err(IndexError::Yaml(_))
        ));
    }
}
