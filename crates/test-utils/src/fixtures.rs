//! Common record fixtures for index tests.

use chrono::{DateTime, TimeZone, Utc};
use grid_common::level::codes;
use grid_common::GridRecord;

/// Model run time shared by the fixtures: 2024-01-15 12Z.
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// A 500 mb temperature record at the given forecast hour.
pub fn temperature_record(grid_definition_id: &str, forecast_hour: i32) -> GridRecord {
    GridRecord::new(
        "TMP",
        grid_definition_id,
        reference_time(),
        forecast_hour,
        codes::ISOBARIC,
        50000.0,
    )
}

/// A surface accumulation record ending at `end_hour` over `interval` hours.
pub fn accumulation_record(grid_definition_id: &str, end_hour: i32, interval: i32) -> GridRecord {
    GridRecord::new(
        format!("APCP{}h", interval),
        grid_definition_id,
        reference_time(),
        end_hour,
        codes::SURFACE,
        0.0,
    )
    .with_decimal_scale(1)
}

/// Records for a short forecast: TMP, UGRD and VGRD at 0, 3 and 6 hours.
pub fn forecast_records(grid_definition_id: &str) -> Vec<GridRecord> {
    let mut records = Vec::new();
    for hour in [0, 3, 6] {
        for param in ["TMP", "UGRD", "VGRD"] {
            records.push(GridRecord::new(
                param,
                grid_definition_id,
                reference_time(),
                hour,
                codes::HEIGHT_ABOVE_GROUND,
                if param == "TMP" { 2.0 } else { 10.0 },
            ));
        }
    }
    records
}
