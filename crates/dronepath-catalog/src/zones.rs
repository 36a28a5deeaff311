//! No-fly zone GeoJSON parsing.

use dronepath_core::{Coordinate, Perimeter};
use serde::Deserialize;

use crate::error::{CatalogError, Result};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

type Ring = Vec<[f64; 2]>;

/// Parse a FeatureCollection of (Multi)Polygons into a perimeter.
///
/// Only the outer ring of each polygon is used. Rings are closed into loops
/// by [`Perimeter::from_polygons`].
pub fn parse_no_fly_zones(geojson: &str) -> Result<Perimeter> {
    let collection: FeatureCollection = serde_json::from_str(geojson)?;
    let mut rings: Vec<Vec<Coordinate>> = Vec::new();

    for feature in collection.features {
        let geometry = feature.geometry;
        match geometry.kind.as_str() {
            "Polygon" => {
                let polygon: Vec<Ring> = serde_json::from_value(geometry.coordinates)?;
                rings.extend(outer_ring(polygon));
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Ring>> = serde_json::from_value(geometry.coordinates)?;
                rings.extend(polygons.into_iter().filter_map(outer_ring));
            }
            other => return Err(CatalogError::UnsupportedGeometry(other.to_string())),
        }
    }

    Ok(Perimeter::from_polygons(rings))
}

fn outer_ring(polygon: Vec<Ring>) -> Option<Vec<Coordinate>> {
    polygon.into_iter().next().map(|ring| {
        ring.into_iter()
            .map(|[lon, lat]| Coordinate::new(lon, lat))
            .collect()
    })
}
