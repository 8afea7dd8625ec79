//! Vertical level type codes.

/// Level type code meaning "no second surface" in GRIB2.
pub const MISSING_LEVEL_TYPE: i32 = 255;

/// Well-known GRIB2 fixed surface types (Code Table 4.5).
pub mod codes {
    /// Ground or water surface
    pub const SURFACE: i32 = 1;
    /// Isobaric surface (Pa)
    pub const ISOBARIC: i32 = 100;
    /// Mean sea level
    pub const MSL: i32 = 101;
    /// Specified height above ground (m)
    pub const HEIGHT_ABOVE_GROUND: i32 = 103;
    /// Sigma level
    pub const SIGMA: i32 = 104;
    /// Hybrid level
    pub const HYBRID: i32 = 105;
    /// Depth below land surface (m)
    pub const DEPTH_BELOW_LAND: i32 = 106;
    /// Entire atmosphere
    pub const ENTIRE_ATMOSPHERE: i32 = 200;
}

/// A level type code paired with its value, as carried on a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelType {
    pub code: i32,
    pub value: f64,
}

impl LevelType {
    pub fn new(code: i32, value: f64) -> Self {
        Self { code, value }
    }

    /// True when the code is one of the "not present" markers.
    pub fn is_missing(&self) -> bool {
        self.code == 0 || self.code == MISSING_LEVEL_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_level() {
        assert!(LevelType::new(MISSING_LEVEL_TYPE, 0.0).is_missing());
        assert!(LevelType::new(0, 0.0).is_missing());
        assert!(!LevelType::new(codes::ISOBARIC, 50000.0).is_missing());
    }
}
