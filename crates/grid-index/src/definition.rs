//! Grid definitions.
//!
//! A [`GridDefinition`] is the format-independent description of one
//! horizontal grid: a bag of named parameters (`Nx`, `Dx`, `La1`, ...) whose
//! values may be strings, integers or floats. Every value can be read back as
//! a string, and is lazily coerced to an integer or double on request. The
//! coercions are cached per key behind `OnceLock`, so a published definition
//! can be read from any number of threads.
//!
//! Malformed values never fail a read: integer reads fall back to
//! [`UNDEFINED`] and double reads to `NaN`.

use crate::gds::{EarthShape, GdsProjection, GdsVariables};
use crate::projection::ProjectionType;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Returned by [`GridDefinition::get_int`] when a value is absent or unparseable.
pub const UNDEFINED: i64 = -9999;

/// Absolute tolerance for decimal parameters in [`GridDefinition::compare`].
///
/// Encoders round coordinates differently around the 3rd to 4th decimal place.
pub const CLOSE_ENOUGH: f64 = 1.0e-3;

/// Well-known parameter names.
pub mod keys {
    pub const GDS_KEY: &str = "GDSkey";
    pub const WIND_FLAG: &str = "Winds";
    pub const RESOLUTION: &str = "Resolution";
    pub const VECTOR_COMPONENT_FLAG: &str = "VectorComponentFlag";
    pub const GRID_TYPE: &str = "grid_type";
    pub const GRID_NAME: &str = "grid_name";
    pub const GRID_SHAPE_CODE: &str = "grid_shape_code";
    pub const GRID_SHAPE: &str = "grid_shape";
    pub const GRID_UNITS: &str = "grid_units";
    pub const RADIUS_SPHERICAL_EARTH: &str = "grid_radius_spherical_earth";
    pub const MAJOR_AXIS_EARTH: &str = "grid_major_axis_earth";
    pub const MINOR_AXIS_EARTH: &str = "grid_minor_axis_earth";
    pub const NX: &str = "Nx";
    pub const NY: &str = "Ny";
    pub const LA1: &str = "La1";
    pub const LO1: &str = "Lo1";
    pub const LA2: &str = "La2";
    pub const LO2: &str = "Lo2";
    pub const DX: &str = "Dx";
    pub const DY: &str = "Dy";
    pub const LAD: &str = "LaD";
    pub const LOV: &str = "LoV";
    pub const LATIN: &str = "Latin";
    pub const LATIN1: &str = "Latin1";
    pub const LATIN2: &str = "Latin2";
    pub const NP: &str = "Np";
    pub const NUMBERPARALLELS: &str = "NumberParallels";
    pub const SPLAT: &str = "SpLat";
    pub const SPLON: &str = "SpLon";
    pub const ROTATIONANGLE: &str = "RotationAngle";
    pub const LAP: &str = "Lap";
    pub const LOP: &str = "Lop";
    pub const XP: &str = "Xp";
    pub const YP: &str = "Yp";
    pub const NR: &str = "Nr";
    pub const PROJECTION_CENTER: &str = "ProjFlag";
    pub const UTM_ZONE: &str = "Zone";
    pub const SCANNING_MODE: &str = "ScanningMode";
    pub const QUASI: &str = "Quasi";

    /// Keys that differ between otherwise identical grids and are skipped
    /// when comparing definitions.
    pub const VOLATILE: [&str; 4] = [WIND_FLAG, RESOLUTION, VECTOR_COMPONENT_FLAG, GDS_KEY];
}

/// Source format a definition was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridFormat {
    Grib1,
    Grib2,
    Gempak,
    McIdas,
}

/// A parameter value as written by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl ParamValue {
    /// Canonical string form. Floats always keep a decimal point
    /// (`45.0`, not `45`).
    fn canonical(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(v) => v.to_string(),
            ParamValue::Float(v) => format!("{:?}", v),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

#[derive(Debug, Clone)]
struct ParamEntry {
    value: ParamValue,
    text: OnceLock<String>,
    int: OnceLock<Option<i64>>,
    double: OnceLock<Option<f64>>,
}

impl ParamEntry {
    fn new(value: ParamValue) -> Self {
        let text = OnceLock::new();
        if !matches!(value, ParamValue::Str(_)) {
            let _ = text.set(value.canonical());
        }
        Self {
            value,
            text,
            int: OnceLock::new(),
            double: OnceLock::new(),
        }
    }

    fn as_str(&self) -> &str {
        self.text.get_or_init(|| self.value.canonical())
    }

    fn as_double(&self) -> Option<f64> {
        *self.double.get_or_init(|| match self.value {
            ParamValue::Float(v) => Some(v),
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Str(_) => self.as_str().trim().parse::<f64>().ok(),
        })
    }

    fn as_int(&self) -> Option<i64> {
        *self.int.get_or_init(|| match self.value {
            ParamValue::Int(v) => Some(v),
            _ => self.as_str().trim().parse::<i64>().ok().or_else(|| {
                self.as_double()
                    .filter(|d| d.is_finite())
                    .map(|d| d.trunc() as i64)
            }),
        })
    }
}

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]*$").expect("valid regex"));
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// How a string value takes part in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueClass {
    Decimal,
    Integer,
    Text,
}

fn classify(value: &str) -> ValueClass {
    if DECIMAL.is_match(value) {
        ValueClass::Decimal
    } else if INTEGER.is_match(value) {
        ValueClass::Integer
    } else {
        ValueClass::Text
    }
}

/// Parameters of one horizontal grid.
///
/// Keys may be overwritten but are never removed for the life of a scan.
#[derive(Debug, Clone)]
pub struct GridDefinition {
    format: GridFormat,
    params: BTreeMap<String, ParamEntry>,
    gds: Option<Arc<GdsVariables>>,
}

impl GridDefinition {
    /// Create an empty definition for the given source format.
    pub fn new(format: GridFormat) -> Self {
        Self {
            format,
            params: BTreeMap::new(),
            gds: None,
        }
    }

    /// Build a definition from decoded GDS values, keeping a shared
    /// reference to them for typed access.
    pub fn from_gds(format: GridFormat, gds: Arc<GdsVariables>) -> Self {
        let mut def = Self::new(format);
        let common = &gds.common;

        def.add_param(keys::GDS_KEY, common.gds_key);
        def.add_param(keys::GRID_TYPE, common.grid_type);
        def.add_param(keys::GRID_NAME, gds.grid_name());
        def.add_param(keys::GRID_UNITS, gds.grid_units());
        def.add_param(keys::GRID_SHAPE_CODE, common.earth_shape_code);
        match common.earth {
            EarthShape::Spherical { radius } => {
                def.add_param(keys::GRID_SHAPE, "spherical");
                def.add_param(keys::RADIUS_SPHERICAL_EARTH, radius);
            }
            EarthShape::Oblate {
                major_axis,
                minor_axis,
            } => {
                def.add_param(keys::GRID_SHAPE, "oblate spheroid");
                def.add_param(keys::MAJOR_AXIS_EARTH, major_axis);
                def.add_param(keys::MINOR_AXIS_EARTH, minor_axis);
            }
        }
        def.add_param(keys::NX, common.nx);
        def.add_param(keys::NY, common.ny);
        def.add_param(keys::RESOLUTION, common.resolution);
        def.add_param(keys::SCANNING_MODE, common.scan_mode as i32);
        if common.is_quasi_regular() {
            def.add_param(keys::QUASI, "true");
        }

        match gds.projection {
            GdsProjection::LatLon {
                la1,
                lo1,
                la2,
                lo2,
                dx,
                dy,
            } => {
                def.add_corners(la1, lo1, la2, lo2);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
            }
            GdsProjection::Gaussian {
                la1,
                lo1,
                la2,
                lo2,
                dx,
                np,
            } => {
                def.add_corners(la1, lo1, la2, lo2);
                def.add_param(keys::DX, dx);
                def.add_param(keys::NP, np);
                def.add_param(keys::NUMBERPARALLELS, np);
            }
            GdsProjection::RotatedLatLon {
                la1,
                lo1,
                la2,
                lo2,
                dx,
                dy,
                sp_lat,
                sp_lon,
                rotation_angle,
            } => {
                def.add_corners(la1, lo1, la2, lo2);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
                def.add_param(keys::SPLAT, sp_lat);
                def.add_param(keys::SPLON, sp_lon);
                def.add_param(keys::ROTATIONANGLE, rotation_angle);
            }
            GdsProjection::Mercator {
                la1,
                lo1,
                la2,
                lo2,
                latin,
                dx,
                dy,
            } => {
                def.add_corners(la1, lo1, la2, lo2);
                def.add_param(keys::LATIN, latin);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
            }
            GdsProjection::LambertConformal {
                la1,
                lo1,
                lov,
                lad,
                latin1,
                latin2,
                dx,
                dy,
                projection_center,
            } => {
                def.add_param(keys::LA1, la1);
                def.add_param(keys::LO1, lo1);
                def.add_param(keys::LOV, lov);
                def.add_param(keys::LAD, lad);
                def.add_param(keys::LATIN1, latin1);
                def.add_param(keys::LATIN2, latin2);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
                def.add_param(keys::PROJECTION_CENTER, projection_center as i32);
            }
            GdsProjection::PolarStereographic {
                la1,
                lo1,
                lov,
                lad,
                dx,
                dy,
                projection_center,
            } => {
                def.add_param(keys::LA1, la1);
                def.add_param(keys::LO1, lo1);
                def.add_param(keys::LOV, lov);
                def.add_param(keys::LAD, lad);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
                def.add_param(keys::PROJECTION_CENTER, projection_center as i32);
            }
            GdsProjection::AlbersEqualArea {
                la1,
                lo1,
                lov,
                lad,
                latin1,
                latin2,
                dx,
                dy,
            } => {
                def.add_param(keys::LA1, la1);
                def.add_param(keys::LO1, lo1);
                def.add_param(keys::LOV, lov);
                def.add_param(keys::LAD, lad);
                def.add_param(keys::LATIN1, latin1);
                def.add_param(keys::LATIN2, latin2);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
            }
            GdsProjection::LambertAzimuthEqualArea {
                la1,
                lo1,
                lad,
                lov,
                dx,
                dy,
            } => {
                def.add_param(keys::LA1, la1);
                def.add_param(keys::LO1, lo1);
                def.add_param(keys::LAD, lad);
                def.add_param(keys::LOV, lov);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
            }
            GdsProjection::Orthographic {
                lap,
                lop,
                dx,
                dy,
                xp,
                yp,
                nr,
            } => {
                def.add_param(keys::LAP, lap);
                def.add_param(keys::LOP, lop);
                def.add_param(keys::DX, dx);
                def.add_param(keys::DY, dy);
                def.add_param(keys::XP, xp);
                def.add_param(keys::YP, yp);
                def.add_param(keys::NR, nr);
            }
            GdsProjection::Utm {
                zone,
                la1,
                lo1,
                la2,
                lo2,
            } => {
                def.add_param(keys::UTM_ZONE, zone);
                def.add_corners(la1, lo1, la2, lo2);
            }
            GdsProjection::Curvilinear => {}
        }

        def.gds = Some(gds);
        def
    }

    fn add_corners(&mut self, la1: f64, lo1: f64, la2: f64, lo2: f64) {
        self.add_param(keys::LA1, la1);
        self.add_param(keys::LO1, lo1);
        self.add_param(keys::LA2, la2);
        self.add_param(keys::LO2, lo2);
    }

    /// Store a value, replacing any previous value for the key.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), ParamEntry::new(value.into()));
    }

    /// String form of a value, `None` if the key was never written.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(ParamEntry::as_str)
    }

    /// Integer form of a value, or [`UNDEFINED`].
    ///
    /// Strings that are not integers are read as doubles and truncated.
    pub fn get_int(&self, key: &str) -> i64 {
        self.params
            .get(key)
            .and_then(ParamEntry::as_int)
            .unwrap_or(UNDEFINED)
    }

    /// Double form of a value, or `NaN`.
    pub fn get_double(&self, key: &str) -> f64 {
        self.params
            .get(key)
            .and_then(ParamEntry::as_double)
            .unwrap_or(f64::NAN)
    }

    /// The value exactly as written.
    pub fn value(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key).map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn format(&self) -> GridFormat {
        self.format
    }

    /// Decoded GDS values this definition was built from, if any.
    pub fn gds(&self) -> Option<&GdsVariables> {
        self.gds.as_deref()
    }

    /// Identifier referenced by records (the string form of `GDSkey`).
    pub fn id(&self) -> Option<&str> {
        self.get_param(keys::GDS_KEY)
    }

    pub fn gds_key(&self) -> i64 {
        self.get_int(keys::GDS_KEY)
    }

    pub fn nx(&self) -> i64 {
        self.get_int(keys::NX)
    }

    pub fn ny(&self) -> i64 {
        self.get_int(keys::NY)
    }

    pub fn is_quasi_regular(&self) -> bool {
        self.contains_key(keys::QUASI)
            || self
                .gds
                .as_ref()
                .is_some_and(|g| g.common.is_quasi_regular())
    }

    /// Projection kind, `None` for a regular lat/lon grid.
    ///
    /// Uses the decoded GDS when present, otherwise the `grid_type` key as
    /// interpreted by the source format.
    pub fn projection_type(&self) -> Option<ProjectionType> {
        if let Some(gds) = &self.gds {
            return gds.projection_type();
        }
        match self.format {
            GridFormat::Grib1 => ProjectionType::from_grib1_grid_type(
                i32::try_from(self.get_int(keys::GRID_TYPE)).ok()?,
            ),
            GridFormat::Grib2 => ProjectionType::from_grib2_template(
                i32::try_from(self.get_int(keys::GRID_TYPE)).ok()?,
            ),
            GridFormat::Gempak | GridFormat::McIdas => self
                .get_param(keys::GRID_TYPE)
                .and_then(ProjectionType::from_navigation_name),
        }
    }

    /// Short label grouping the datasets that share this grid.
    ///
    /// GRIB: `{projection}_{Nx}X{Ny}-{La1}N-{Lo1}E`.
    /// GEMPAK/McIDAS: `{grid name}_{Nx}X{Ny}`.
    pub fn group_name(&self) -> String {
        let projection = self
            .projection_type()
            .map(|p| p.as_str())
            .unwrap_or("LatLon");
        match self.format {
            GridFormat::Grib1 | GridFormat::Grib2 => {
                let mut name = format!("{}_{}X{}", projection, self.nx(), self.ny());
                let (la1, lo1) = (self.get_double(keys::LA1), self.get_double(keys::LO1));
                if la1.is_finite() && lo1.is_finite() {
                    name.push_str(&format!("-{:.2}N-{:.2}E", la1, lo1));
                }
                name
            }
            GridFormat::Gempak | GridFormat::McIdas => {
                let label = self
                    .get_param(keys::GRID_NAME)
                    .map(|s| s.trim().replace(' ', "_"))
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| projection.to_string());
                format!("{}_{}X{}", label, self.nx(), self.ny())
            }
        }
    }

    /// Structural equality ignoring the volatile keys.
    ///
    /// Decimal values (digits, a point, digits) are compared within
    /// [`CLOSE_ENOUGH`]; everything else must match as strings. Definitions
    /// with a different number of keys are never equal.
    pub fn compare(a: &GridDefinition, b: &GridDefinition) -> bool {
        if a.len() != b.len() {
            return false;
        }
        for key in a.keys() {
            if keys::VOLATILE.contains(&key) {
                continue;
            }
            let (Some(val), Some(oval)) = (a.get_param(key), b.get_param(key)) else {
                return false;
            };
            let same = match classify(val) {
                ValueClass::Decimal => {
                    (a.get_double(key) - b.get_double(key)).abs() <= CLOSE_ENOUGH
                }
                ValueClass::Integer | ValueClass::Text => val == oval,
            };
            if !same {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for GridDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.group_name())?;
        for (key, entry) in &self.params {
            write!(f, "\n  {} = {}", key, entry.as_str())?;
        }
        Ok(())
    }
}
