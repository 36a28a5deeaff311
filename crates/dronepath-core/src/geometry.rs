//! Planar geometry for the confined delivery airspace.
//!
//! Coordinates are treated as points on a flat (longitude, latitude) plane.
//! The airspace is small enough that great-circle corrections are ignored.

use serde::{Deserialize, Serialize};

/// Distance travelled by a single move, in degrees.
pub const STEP: f64 = 0.00015;

/// Bearing value meaning "stay in place".
pub const HOVER: i32 = -999;

/// A (longitude, latitude) position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Euclidean distance in degrees.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dlon = self.lon - other.lon;
        let dlat = self.lat - other.lat;
        (dlon * dlon + dlat * dlat).sqrt()
    }

    /// Arrival predicate: within one STEP of `other`.
    pub fn close_to(&self, other: &Coordinate) -> bool {
        self.distance_to(other) < STEP
    }

    /// Compass bearing towards `other`, quantized to a multiple of 10 degrees.
    ///
    /// The angle comes from the arcsine of the latitude delta over the
    /// distance, mirrored through 180 when heading west, so results fall in
    /// [-90, 270]. Quantization goes through a one-decimal rounding of
    /// `angle / 100` followed by truncation, which is why a south-west
    /// diagonal lands on 229 rather than 230. Obstacle avoidance depends on
    /// this exact output.
    pub fn bearing_to(&self, other: &Coordinate) -> i32 {
        let ratio = (other.lat - self.lat) / self.distance_to(other);
        let degrees = if other.lon - self.lon < 0.0 {
            180.0 - ratio.asin().to_degrees()
        } else {
            ratio.asin().to_degrees()
        };
        let hundreds = degrees / 100.0;
        let rounded = (hundreds * 10.0 + 0.5).floor() / 10.0;
        (rounded * 100.0) as i32
    }

    /// Position after one STEP along `bearing`. [`HOVER`] leaves it unchanged.
    pub fn advance(&self, bearing: i32) -> Coordinate {
        if bearing == HOVER {
            return *self;
        }
        let radians = f64::from(bearing).to_radians();
        Coordinate {
            lon: self.lon + radians.cos() * STEP,
            lat: self.lat + radians.sin() * STEP,
        }
    }
}

/// A straight line between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Segment {
    pub const fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self, other)
    }

    /// True when `a` and `b` lie strictly on opposite sides of this segment.
    fn separates(&self, a: &Coordinate, b: &Coordinate) -> bool {
        ccw(a, &self.start, &self.end) != ccw(b, &self.start, &self.end)
    }
}

fn ccw(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> bool {
    (c.lat - a.lat) * (b.lon - a.lon) > (b.lat - a.lat) * (c.lon - a.lon)
}

/// Segment intersection test.
///
/// Segments sharing an endpoint (exact equality) always intersect. Otherwise
/// each segment's endpoints must straddle the other segment. Both straddle
/// checks anchor at the tested point, so swapping the arguments gives the
/// same answer bit for bit.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> bool {
    if s1.start == s2.start || s1.start == s2.end || s1.end == s2.start || s1.end == s2.end {
        return true;
    }
    s2.separates(&s1.start, &s1.end) && s1.separates(&s2.start, &s2.end)
}

/// Closed longitude/latitude rectangle the drone must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Airspace {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Airspace {
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.lon >= self.min_lon
            && point.lon <= self.max_lon
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }
}

impl Default for Airspace {
    fn default() -> Self {
        Self {
            min_lon: -3.192473,
            max_lon: -3.184319,
            min_lat: 55.942617,
            max_lat: 55.946233,
        }
    }
}
