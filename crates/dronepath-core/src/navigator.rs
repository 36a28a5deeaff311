//! Move legality and obstacle-avoiding bearing selection.

use crate::geometry::{Airspace, Coordinate, Segment};
use crate::perimeter::Perimeter;

/// Bearing search granularity in degrees.
pub const BEARING_INCREMENT: i32 = 10;

/// Largest offset tried either side of the direct bearing.
pub const MAX_BEARING_OFFSET: i32 = 180;

/// Decides which single moves are allowed and which way to head.
#[derive(Debug, Clone)]
pub struct Navigator {
    perimeter: Perimeter,
    airspace: Airspace,
}

impl Navigator {
    pub fn new(perimeter: Perimeter, airspace: Airspace) -> Self {
        Self {
            perimeter,
            airspace,
        }
    }

    pub fn perimeter(&self) -> &Perimeter {
        &self.perimeter
    }

    pub fn airspace(&self) -> &Airspace {
        &self.airspace
    }

    /// A move is legal when it ends inside the airspace and its straight line
    /// touches no no-fly boundary.
    pub fn is_legal(&self, from: &Coordinate, to: &Coordinate) -> bool {
        if !self.airspace.contains(to) {
            return false;
        }
        !self.perimeter.crossed_by(&Segment::new(*from, *to))
    }

    /// Bearing for the next move from `from` towards `to`.
    ///
    /// Tries the direct bearing, then offsets of +10, -10, +20, -20 and so on
    /// up to 180 degrees. If nothing in the sweep is legal the direct bearing
    /// is returned anyway.
    pub fn choose_bearing(&self, from: &Coordinate, to: &Coordinate) -> i32 {
        let direct = from.bearing_to(to);
        if self.is_legal(from, &from.advance(direct)) {
            return direct;
        }

        let offsets = (BEARING_INCREMENT..=MAX_BEARING_OFFSET)
            .step_by(BEARING_INCREMENT as usize)
            .flat_map(|magnitude| [magnitude, -magnitude]);
        for offset in offsets {
            let bearing = direct + offset;
            if self.is_legal(from, &from.advance(bearing)) {
                return bearing;
            }
        }

        tracing::warn!(
            lon = from.lon,
            lat = from.lat,
            bearing = direct,
            "No legal bearing in full sweep, moving on direct bearing"
        );
        direct
    }
}
