//! Projection kinds recognized by the table lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of non lat/lon projections.
///
/// Plain (regular) lat/lon grids have no variant; they are reported as
/// `None` by the lookup functions and by [`ProjectionType::from_grib2_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionType {
    PolarStereographic,
    LambertConformal,
    Mercator,
    Utm,
    AlbersEqualArea,
    LambertAzimuthEqualArea,
    Orthographic,
    GaussianLatLon,
    RotatedLatLon,
    Curvilinear,
}

impl ProjectionType {
    /// Map a GRIB2 grid definition template number (Code Table 3.1).
    pub fn from_grib2_template(template: i32) -> Option<Self> {
        match template {
            1 => Some(Self::RotatedLatLon),
            10 => Some(Self::Mercator),
            20 => Some(Self::PolarStereographic),
            30 => Some(Self::LambertConformal),
            31 => Some(Self::AlbersEqualArea),
            40 | 41 => Some(Self::GaussianLatLon),
            90 => Some(Self::Orthographic),
            140 => Some(Self::LambertAzimuthEqualArea),
            204 => Some(Self::Curvilinear),
            _ => None,
        }
    }

    /// Map a GRIB1 data representation type (Table 6).
    pub fn from_grib1_grid_type(grid_type: i32) -> Option<Self> {
        match grid_type {
            1 => Some(Self::Mercator),
            3 => Some(Self::LambertConformal),
            4 => Some(Self::GaussianLatLon),
            5 => Some(Self::PolarStereographic),
            8 => Some(Self::AlbersEqualArea),
            10 => Some(Self::RotatedLatLon),
            90 => Some(Self::Orthographic),
            _ => None,
        }
    }

    /// Map a GEMPAK or McIDAS navigation projection name.
    pub fn from_navigation_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "STR" | "PS" | "PSN" | "PSS" => Some(Self::PolarStereographic),
            "LCC" | "LCS" | "LAMB" => Some(Self::LambertConformal),
            "MER" | "MERC" => Some(Self::Mercator),
            "UTM" => Some(Self::Utm),
            "LEA" | "LAEA" => Some(Self::LambertAzimuthEqualArea),
            "ORT" | "GVAR" => Some(Self::Orthographic),
            "ROT" => Some(Self::RotatedLatLon),
            _ => None,
        }
    }

    /// Short name used in group and grid labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PolarStereographic => "Polar_Stereographic",
            Self::LambertConformal => "Lambert_Conformal",
            Self::Mercator => "Mercator",
            Self::Utm => "UTM",
            Self::AlbersEqualArea => "Albers_Equal_Area",
            Self::LambertAzimuthEqualArea => "Lambert_Azimuth_Equal_Area",
            Self::Orthographic => "Orthographic",
            Self::GaussianLatLon => "Gaussian_Lat_Lon",
            Self::RotatedLatLon => "Rotated_Lat_Lon",
            Self::Curvilinear => "Curvilinear",
        }
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
