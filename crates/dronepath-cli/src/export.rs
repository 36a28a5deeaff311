//! GeoJSON export of the day's flight.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dronepath_core::Coordinate;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// File name for a day's flight, `drone-DD-MM-YYYY.geojson`.
pub fn flightpath_file_name(date: NaiveDate) -> String {
    format!("drone-{}.geojson", date.format("%d-%m-%Y"))
}

/// A FeatureCollection holding the path as a single LineString.
pub fn flightpath_geojson(path: &[Coordinate]) -> Value {
    let coordinates: Vec<[f64; 2]> = path.iter().map(|p| [p.lon, p.lat]).collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            }
        }]
    })
}

/// Write the day's flight into `output_dir` and return the file written.
pub fn write_flightpath(output_dir: &Path, date: NaiveDate, path: &[Coordinate]) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let file = output_dir.join(flightpath_file_name(date));
    let body = serde_json::to_string(&flightpath_geojson(path))?;
    std::fs::write(&file, body).with_context(|| format!("writing {}", file.display()))?;
    Ok(file)
}
