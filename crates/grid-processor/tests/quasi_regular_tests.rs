//! Integration tests for quasi-regular resampling on generated reduced grids.

use grid_processor::{
    expected_len, resample_quasi_regular, GridProcessorError, QuasiRegular, QuasiRegularConfig,
    NATURAL_BOUNDARY,
};
use test_utils::{
    assert_approx_eq, assert_slice_approx_eq, create_quasi_regular_field, max_parallel,
    octahedral_parallels,
};

#[test]
fn test_output_is_full_rectangle() {
    let parallels = octahedral_parallels(8);
    let ni = max_parallel(&parallels);
    let quasi = create_quasi_regular_field(&parallels, |row, t| row as f32 + t as f32);

    let data = resample_quasi_regular(&quasi, &parallels, ni, parallels.len());

    assert_eq!(data.len(), ni * parallels.len());
    assert!(data.iter().all(|v| v.is_finite()));
}

#[test]
fn test_full_width_rows_are_copied_bit_for_bit() {
    let parallels = octahedral_parallels(6);
    let ni = max_parallel(&parallels);
    // Awkward values that would not survive a round trip through interpolation
    let quasi = create_quasi_regular_field(&parallels, |row, t| {
        (row as f64 * 0.1 + (t * 7.3).sin() / 3.0) as f32
    });

    let data = resample_quasi_regular(&quasi, &parallels, ni, parallels.len());

    let mut offset = 0;
    for (j, &n) in parallels.iter().enumerate() {
        let n = n as usize;
        if n == ni {
            let input = &quasi[offset..offset + n];
            let output = &data[j * ni..(j + 1) * ni];
            for (a, b) in input.iter().zip(output.iter()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
        offset += n;
    }
}

#[test]
fn test_integer_positions_pass_through() {
    // 5 points onto 9 columns: every even column lands on an input point
    let row = [3.25_f32, -1.5, 8.0, 0.125, 4.75];
    let data = resample_quasi_regular(&row, &[5], 9, 1);

    for (k, &sample) in row.iter().enumerate() {
        assert_eq!(data[2 * k].to_bits(), sample.to_bits());
    }
}

#[test]
fn test_row_endpoints_pass_through() {
    let parallels = octahedral_parallels(4);
    let ni = max_parallel(&parallels);
    let quasi = create_quasi_regular_field(&parallels, |row, t| 100.0 * row as f32 + (t * t) as f32);

    let data = resample_quasi_regular(&quasi, &parallels, ni, parallels.len());

    let mut offset = 0;
    for (j, &n) in parallels.iter().enumerate() {
        let n = n as usize;
        assert_eq!(data[j * ni], quasi[offset]);
        assert_eq!(data[(j + 1) * ni - 1], quasi[offset + n - 1]);
        offset += n;
    }
}

#[test]
fn test_linear_rows_are_reproduced() {
    let parallels = [4, 7, 10, 7, 4];
    let ni = 13;
    let quasi = create_quasi_regular_field(&parallels, |row, t| 10.0 * row as f32 + 5.0 * t as f32);

    let data = resample_quasi_regular(&quasi, &parallels, ni, parallels.len());

    for j in 0..parallels.len() {
        let expected: Vec<f32> = (0..ni)
            .map(|i| 10.0 * j as f32 + 5.0 * i as f32 / (ni - 1) as f32)
            .collect();
        assert_slice_approx_eq!(&data[j * ni..(j + 1) * ni], &expected, 1e-4);
    }
}

#[test]
fn test_smooth_field_stays_close_to_source_function() {
    let parallels = octahedral_parallels(10);
    let ni = max_parallel(&parallels);
    let f = |t: f64| (std::f64::consts::PI * t).sin();
    let quasi = create_quasi_regular_field(&parallels, |_, t| f(t) as f32);

    let data = resample_quasi_regular(&quasi, &parallels, ni, parallels.len());

    for j in 0..parallels.len() {
        for i in 0..ni {
            let t = i as f64 / (ni - 1) as f64;
            assert_approx_eq!(data[j * ni + i], f(t), 1e-3);
        }
    }
}

#[test]
fn test_upsampling_wider_than_any_row() {
    let parallels = [3, 3];
    let quasi = [0.0, 1.0, 0.0, 2.0, 2.0, 2.0];

    let data = resample_quasi_regular(&quasi, &parallels, 5, 2);

    assert_slice_approx_eq!(&data[..5], &[0.0, 0.6875, 1.0, 0.6875, 0.0], 1e-6);
    assert_slice_approx_eq!(&data[5..], &[2.0; 5], 1e-6);
}

#[test]
fn test_clamped_boundary_differs_from_natural() {
    let row = [0.0_f32, 1.0, 0.0];
    let natural = resample_quasi_regular(&row, &[3], 5, 1);

    let clamped = QuasiRegular::new(QuasiRegularConfig {
        start_derivative: 0.0,
        end_derivative: 0.0,
    })
    .resample(&row, &[3], 5, 1);

    assert_eq!(natural[0], clamped[0]);
    assert_eq!(natural[2], clamped[2]);
    assert!((natural[1] - clamped[1]).abs() > 1e-4);
}

#[test]
fn test_checked_accepts_consistent_grid() {
    let parallels = octahedral_parallels(4);
    let ni = max_parallel(&parallels);
    let quasi = vec![1.0_f32; expected_len(&parallels)];

    let data = QuasiRegular::default()
        .resample_checked(&quasi, &parallels, ni, parallels.len())
        .unwrap();
    assert_eq!(data, vec![1.0; ni * parallels.len()]);
}

#[test]
fn test_checked_reports_short_data() {
    let parallels = octahedral_parallels(4);
    let quasi = vec![0.0_f32; expected_len(&parallels) - 1];

    let err = QuasiRegular::default()
        .resample_checked(&quasi, &parallels, 24, 4)
        .unwrap_err();
    assert!(matches!(err, GridProcessorError::InvalidGrid(_)));
    assert!(err.to_string().contains("88"));
}

#[test]
fn test_config_from_yaml_defaults_missing_ends() {
    let config: QuasiRegularConfig = serde_yaml::from_str("start_derivative: 0.5\n").unwrap();
    assert_eq!(config.start_derivative, 0.5);
    assert_eq!(config.end_derivative, NATURAL_BOUNDARY);
    assert!(config.validate().is_ok());
}
