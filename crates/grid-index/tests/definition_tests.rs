//! Integration tests for grid definitions: coercion, comparison and GDS import.

use grid_index::{
    keys, EarthShape, GdsCommon, GdsProjection, GdsVariables, GridDefinition, GridFormat,
    ParamValue, ProjectionType, UNDEFINED,
};
use std::sync::Arc;
use std::thread;

fn lambert_gds(gds_key: i32) -> GdsVariables {
    GdsVariables::new(
        GdsCommon::new(93, 65, gds_key, 30),
        GdsProjection::LambertConformal {
            la1: 12.19,
            lo1: 226.541,
            lov: 265.0,
            lad: 25.0,
            latin1: 25.0,
            latin2: 25.0,
            dx: 81270.5,
            dy: 81270.5,
            projection_center: 0,
        },
    )
}

fn latlon_definition() -> GridDefinition {
    let mut d = GridDefinition::new(GridFormat::Grib2);
    d.add_param(keys::GDS_KEY, 101);
    d.add_param(keys::GRID_TYPE, 0);
    d.add_param(keys::NX, 1440);
    d.add_param(keys::NY, 721);
    d.add_param(keys::LA1, "90.0");
    d.add_param(keys::LO1, "0.0");
    d.add_param(keys::DX, 0.25);
    d.add_param(keys::RESOLUTION, 48);
    d
}

// =============================================================================
// COERCION
// =============================================================================

#[test]
fn test_int_values_read_back_as_int_and_string() {
    let mut d = GridDefinition::new(GridFormat::Grib1);
    for (i, v) in [0i64, 1, -1, 42, 1799, i32::MAX as i64, -9998].iter().enumerate() {
        let key = format!("k{}", i);
        d.add_param(key.as_str(), *v);
        assert_eq!(d.get_int(&key), *v);
        assert_eq!(d.get_param(&key), Some(v.to_string().as_str()));
    }
}

#[test]
fn test_unset_keys_return_sentinels() {
    let d = latlon_definition();
    assert_eq!(d.get_int("NotAKey"), UNDEFINED);
    assert!(d.get_double("NotAKey").is_nan());
    assert_eq!(d.get_param("NotAKey"), None);
}

#[test]
fn test_malformed_strings_degrade_to_sentinels() {
    let mut d = GridDefinition::new(GridFormat::McIdas);
    d.add_param(keys::DX, "12,5");
    d.add_param(keys::DY, "");

    assert_eq!(d.get_int(keys::DX), UNDEFINED);
    assert!(d.get_double(keys::DX).is_nan());
    assert_eq!(d.get_int(keys::DY), UNDEFINED);
    // The raw string is still available
    assert_eq!(d.get_param(keys::DX), Some("12,5"));
}

#[test]
fn test_int_read_of_decimal_string_truncates() {
    let mut d = GridDefinition::new(GridFormat::Gempak);
    d.add_param(keys::LO1, "-95.75");
    assert_eq!(d.get_int(keys::LO1), -95);
    assert_eq!(d.get_double(keys::LO1), -95.75);
}

#[test]
fn test_value_keeps_written_type() {
    let d = latlon_definition();
    assert_eq!(d.value(keys::NX), Some(&ParamValue::Int(1440)));
    assert_eq!(d.value(keys::LA1), Some(&ParamValue::Str("90.0".to_string())));
    assert_eq!(d.value(keys::DX), Some(&ParamValue::Float(0.25)));
}

#[test]
fn test_keys_only_grow() {
    let mut d = latlon_definition();
    let before = d.len();
    d.add_param(keys::NX, 720);
    assert_eq!(d.len(), before);
    d.add_param(keys::DY, 0.25);
    assert_eq!(d.len(), before + 1);
    assert!(d.keys().any(|k| k == keys::DY));
}

// =============================================================================
// COMPARE
// =============================================================================

#[test]
fn test_compare_with_itself() {
    let d = latlon_definition();
    assert!(GridDefinition::compare(&d, &d));

    let lambert = GridDefinition::from_gds(GridFormat::Grib2, Arc::new(lambert_gds(1)));
    assert!(GridDefinition::compare(&lambert, &lambert));
}

#[test]
fn test_compare_size_mismatch_is_false() {
    let a = latlon_definition();
    let mut b = latlon_definition();
    b.add_param("Extra", "x");
    assert!(!GridDefinition::compare(&a, &b));
    assert!(!GridDefinition::compare(&b, &a));

    // Even when the extra key is volatile
    let mut c = latlon_definition();
    c.add_param(keys::WIND_FLAG, 8);
    assert!(!GridDefinition::compare(&a, &c));
}

#[test]
fn test_compare_decimal_tolerance() {
    let mut a = latlon_definition();
    let mut b = latlon_definition();
    a.add_param(keys::LA2, "21.1380");
    b.add_param(keys::LA2, 21.1381);
    assert!(GridDefinition::compare(&a, &b));

    b.add_param(keys::LA2, 22.138);
    assert!(!GridDefinition::compare(&a, &b));
}

#[test]
fn test_compare_ignores_volatile_keys() {
    let a = latlon_definition();
    let mut b = latlon_definition();
    b.add_param(keys::GDS_KEY, 202);
    b.add_param(keys::RESOLUTION, 0);
    assert!(GridDefinition::compare(&a, &b));
}

#[test]
fn test_compare_integers_and_text_exactly() {
    let a = latlon_definition();
    let mut b = latlon_definition();
    b.add_param(keys::NX, "01440");
    assert!(!GridDefinition::compare(&a, &b));

    // Signed values do not classify as decimals and must match as text
    let mut c = latlon_definition();
    let mut e = latlon_definition();
    c.add_param(keys::LO2, "-95.5");
    e.add_param(keys::LO2, "-95.5001");
    assert!(!GridDefinition::compare(&c, &e));
}

#[test]
fn test_compare_gds_grids_with_different_keys() {
    let a = GridDefinition::from_gds(GridFormat::Grib2, Arc::new(lambert_gds(1)));
    let b = GridDefinition::from_gds(GridFormat::Grib2, Arc::new(lambert_gds(2)));
    assert!(GridDefinition::compare(&a, &b));
    assert_ne!(a.gds_key(), b.gds_key());
}

// =============================================================================
// FROM GDS
// =============================================================================

#[test]
fn test_from_gds_lambert() {
    let d = GridDefinition::from_gds(GridFormat::Grib2, Arc::new(lambert_gds(77)));

    assert_eq!(d.id(), Some("77"));
    assert_eq!(d.nx(), 93);
    assert_eq!(d.ny(), 65);
    assert_eq!(d.get_double(keys::LATIN1), 25.0);
    assert_eq!(d.get_param(keys::LOV), Some("265.0"));
    assert_eq!(d.get_param(keys::GRID_UNITS), Some("m"));
    assert_eq!(d.get_param(keys::GRID_SHAPE), Some("spherical"));
    assert_eq!(d.get_double(keys::RADIUS_SPHERICAL_EARTH), 6_367_470.0);
    assert_eq!(d.projection_type(), Some(ProjectionType::LambertConformal));
    assert_eq!(d.group_name(), "Lambert_Conformal_93X65-12.19N-226.54E");
    assert!(!d.is_quasi_regular());
    assert!(d.gds().is_some());
    assert!(!d.contains_key(keys::LA2));
}

#[test]
fn test_from_gds_oblate_latlon() {
    let mut common = GdsCommon::new(360, 181, 5, 0);
    common.earth_shape_code = 2;
    common.earth = EarthShape::Oblate {
        major_axis: 6_378_160.0,
        minor_axis: 6_356_775.0,
    };
    let gds = GdsVariables::new(
        common,
        GdsProjection::LatLon {
            la1: 90.0,
            lo1: 0.0,
            la2: -90.0,
            lo2: 359.0,
            dx: 1.0,
            dy: 1.0,
        },
    );
    let d = GridDefinition::from_gds(GridFormat::Grib1, Arc::new(gds));

    assert_eq!(d.get_param(keys::GRID_SHAPE), Some("oblate spheroid"));
    assert_eq!(d.get_double(keys::MAJOR_AXIS_EARTH), 6_378_160.0);
    assert!(!d.contains_key(keys::RADIUS_SPHERICAL_EARTH));
    assert_eq!(d.projection_type(), None);
    assert_eq!(d.group_name(), "LatLon_360X181-90.00N-0.00E");
}

#[test]
fn test_from_gds_reduced_gaussian() {
    let mut common = GdsCommon::new(-1, 4, 9, 40);
    common.parallels = Some(vec![20, 24, 24, 20]);
    let gds = GdsVariables::new(
        common,
        GdsProjection::Gaussian {
            la1: 67.5,
            lo1: 0.0,
            la2: -67.5,
            lo2: 342.0,
            dx: 0.0,
            np: 2,
        },
    );
    let d = GridDefinition::from_gds(GridFormat::Grib2, Arc::new(gds));

    assert!(d.is_quasi_regular());
    assert_eq!(d.get_param(keys::QUASI), Some("true"));
    assert_eq!(d.get_int(keys::NUMBERPARALLELS), 2);
    assert_eq!(d.projection_type(), Some(ProjectionType::GaussianLatLon));
}

#[test]
fn test_display_lists_parameters() {
    let d = latlon_definition();
    let text = d.to_string();
    assert!(text.starts_with("LatLon_1440X721-90.00N-0.00E"));
    assert!(text.contains("Nx = 1440"));
    assert!(text.contains("Dx = 0.25"));
}

// =============================================================================
// CONCURRENT READS
// =============================================================================

#[test]
fn test_concurrent_reads_after_publication() {
    let mut d = latlon_definition();
    d.add_param(keys::LA2, "-90.0");
    d.add_param(keys::LO2, "359.75");
    let d = Arc::new(d);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let d = Arc::clone(&d);
            thread::spawn(move || {
                for _ in 0..1000 {
                    assert_eq!(d.get_int(keys::NX), 1440);
                    assert_eq!(d.get_double(keys::LO2), 359.75);
                    assert_eq!(d.get_int(keys::LA2), -90);
                    assert_eq!(d.get_param(keys::DX), Some("0.25"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
