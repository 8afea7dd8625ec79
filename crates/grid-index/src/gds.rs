//! Decoded grid definition section values.
//!
//! Decoders hand over one [`GdsVariables`] per distinct grid definition
//! section. Fields shared by every projection live in [`GdsCommon`]; the
//! projection-specific values live in the matching [`GdsProjection`]
//! variant, so a consumer never asks a Mercator grid for its `LoV`.

use crate::projection::ProjectionType;

/// Figure of the earth used by the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EarthShape {
    /// Sphere with the given radius in meters
    Spherical { radius: f64 },
    /// Oblate spheroid with axes in meters
    Oblate { major_axis: f64, minor_axis: f64 },
}

impl Default for EarthShape {
    fn default() -> Self {
        EarthShape::Spherical { radius: 6_367_470.0 }
    }
}

/// Values present on every grid definition.
#[derive(Debug, Clone, PartialEq)]
pub struct GdsCommon {
    /// Points along a parallel (missing for quasi-regular grids, see `parallels`)
    pub nx: i32,
    /// Points along a meridian
    pub ny: i32,
    /// Hash identifying this definition within a scan
    pub gds_key: i32,
    /// GRIB1 data representation type or GRIB2 template number
    pub grid_type: i32,
    /// Code of the earth shape as encoded in the source
    pub earth_shape_code: i32,
    pub earth: EarthShape,
    /// Resolution and component flags
    pub resolution: i32,
    /// Scanning mode flags
    pub scan_mode: u8,
    /// Points per row for quasi-regular grids
    pub parallels: Option<Vec<u32>>,
}

impl GdsCommon {
    pub fn new(nx: i32, ny: i32, gds_key: i32, grid_type: i32) -> Self {
        Self {
            nx,
            ny,
            gds_key,
            grid_type,
            earth_shape_code: 0,
            earth: EarthShape::default(),
            resolution: 0,
            scan_mode: 0,
            parallels: None,
        }
    }

    pub fn is_quasi_regular(&self) -> bool {
        self.parallels.is_some()
    }
}

/// Projection-specific values, in degrees for angles and meters (or degrees
/// for lat/lon grids) for increments.
#[derive(Debug, Clone, PartialEq)]
pub enum GdsProjection {
    LatLon {
        la1: f64,
        lo1: f64,
        la2: f64,
        lo2: f64,
        dx: f64,
        dy: f64,
    },
    Gaussian {
        la1: f64,
        lo1: f64,
        la2: f64,
        lo2: f64,
        dx: f64,
        /// Parallels between a pole and the equator
        np: i32,
    },
    RotatedLatLon {
        la1: f64,
        lo1: f64,
        la2: f64,
        lo2: f64,
        dx: f64,
        dy: f64,
        sp_lat: f64,
        sp_lon: f64,
        rotation_angle: f64,
    },
    Mercator {
        la1: f64,
        lo1: f64,
        la2: f64,
        lo2: f64,
        latin: f64,
        dx: f64,
        dy: f64,
    },
    LambertConformal {
        la1: f64,
        lo1: f64,
        lov: f64,
        lad: f64,
        latin1: f64,
        latin2: f64,
        dx: f64,
        dy: f64,
        projection_center: u8,
    },
    PolarStereographic {
        la1: f64,
        lo1: f64,
        lov: f64,
        lad: f64,
        dx: f64,
        dy: f64,
        projection_center: u8,
    },
    AlbersEqualArea {
        la1: f64,
        lo1: f64,
        lov: f64,
        lad: f64,
        latin1: f64,
        latin2: f64,
        dx: f64,
        dy: f64,
    },
    LambertAzimuthEqualArea {
        la1: f64,
        lo1: f64,
        /// Standard parallel
        lad: f64,
        /// Central longitude
        lov: f64,
        dx: f64,
        dy: f64,
    },
    Orthographic {
        /// Sub-satellite point
        lap: f64,
        lop: f64,
        dx: f64,
        dy: f64,
        xp: f64,
        yp: f64,
        /// Altitude of the camera in earth radii
        nr: f64,
    },
    Utm {
        zone: i32,
        la1: f64,
        lo1: f64,
        la2: f64,
        lo2: f64,
    },
    Curvilinear,
}

/// A decoded grid definition section.
#[derive(Debug, Clone, PartialEq)]
pub struct GdsVariables {
    pub common: GdsCommon,
    pub projection: GdsProjection,
}

impl GdsVariables {
    pub fn new(common: GdsCommon, projection: GdsProjection) -> Self {
        Self { common, projection }
    }

    /// Projection kind, `None` for a regular lat/lon grid.
    pub fn projection_type(&self) -> Option<ProjectionType> {
        match self.projection {
            GdsProjection::LatLon { .. } => None,
            GdsProjection::Gaussian { .. } => Some(ProjectionType::GaussianLatLon),
            GdsProjection::RotatedLatLon { .. } => Some(ProjectionType::RotatedLatLon),
            GdsProjection::Mercator { .. } => Some(ProjectionType::Mercator),
            GdsProjection::LambertConformal { .. } => Some(ProjectionType::LambertConformal),
            GdsProjection::PolarStereographic { .. } => Some(ProjectionType::PolarStereographic),
            GdsProjection::AlbersEqualArea { .. } => Some(ProjectionType::AlbersEqualArea),
            GdsProjection::LambertAzimuthEqualArea { .. } => {
                Some(ProjectionType::LambertAzimuthEqualArea)
            }
            GdsProjection::Orthographic { .. } => Some(ProjectionType::Orthographic),
            GdsProjection::Utm { .. } => Some(ProjectionType::Utm),
            GdsProjection::Curvilinear => Some(ProjectionType::Curvilinear),
        }
    }

    /// Regular and Gaussian lat/lon grids carry geographic coordinates directly.
    pub fn is_lat_lon(&self) -> bool {
        matches!(
            self.projection,
            GdsProjection::LatLon { .. } | GdsProjection::Gaussian { .. }
        )
    }

    /// Human-readable grid name, e.g. "Lambert conformal".
    pub fn grid_name(&self) -> &'static str {
        match self.projection {
            GdsProjection::LatLon { .. } => "Latitude/Longitude",
            GdsProjection::Gaussian { .. } => "Gaussian latitude/longitude",
            GdsProjection::RotatedLatLon { .. } => "Rotated latitude/longitude",
            GdsProjection::Mercator { .. } => "Mercator",
            GdsProjection::LambertConformal { .. } => "Lambert conformal",
            GdsProjection::PolarStereographic { .. } => "Polar stereographic",
            GdsProjection::AlbersEqualArea { .. } => "Albers equal area",
            GdsProjection::LambertAzimuthEqualArea { .. } => "Lambert azimuthal equal area",
            GdsProjection::Orthographic { .. } => "Space view perspective or orthographic",
            GdsProjection::Utm { .. } => "Universal transverse mercator",
            GdsProjection::Curvilinear => "Curvilinear orthogonal",
        }
    }

    /// Units of the dx/dy increments.
    pub fn grid_units(&self) -> &'static str {
        match self.projection {
            GdsProjection::LatLon { .. }
            | GdsProjection::Gaussian { .. }
            | GdsProjection::RotatedLatLon { .. } => "degrees",
            GdsProjection::Curvilinear => "",
            _ => "m",
        }
    }

    /// First grid point, when the projection defines one.
    pub fn first_point(&self) -> Option<(f64, f64)> {
        match self.projection {
            GdsProjection::LatLon { la1, lo1, .. }
            | GdsProjection::Gaussian { la1, lo1, .. }
            | GdsProjection::RotatedLatLon { la1, lo1, .. }
            | GdsProjection::Mercator { la1, lo1, .. }
            | GdsProjection::LambertConformal { la1, lo1, .. }
            | GdsProjection::PolarStereographic { la1, lo1, .. }
            | GdsProjection::AlbersEqualArea { la1, lo1, .. }
            | GdsProjection::LambertAzimuthEqualArea { la1, lo1, .. }
            | GdsProjection::Utm { la1, lo1, .. } => Some((la1, lo1)),
            GdsProjection::Orthographic { lap, lop, .. } => Some((lap, lop)),
            GdsProjection::Curvilinear => None,
        }
    }
}
