//! Flattened boundary of every no-fly zone.

use crate::geometry::{Coordinate, Segment};
use serde::{Deserialize, Serialize};

/// All no-fly polygon edges as one flat list of segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Perimeter {
    segments: Vec<Segment>,
}

impl Perimeter {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Build from polygon rings. Each ring is closed back to its first vertex,
    /// whether or not the input repeats it at the end.
    pub fn from_polygons<I, R>(polygons: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Coordinate]>,
    {
        let mut segments = Vec::new();
        for ring in polygons {
            let ring = ring.as_ref();
            let (Some(first), Some(last)) = (ring.first(), ring.last()) else {
                continue;
            };
            for pair in ring.windows(2) {
                segments.push(Segment::new(pair[0], pair[1]));
            }
            if ring.len() > 1 && first != last {
                segments.push(Segment::new(*last, *first));
            }
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether `segment` touches or crosses any boundary edge.
    pub fn crossed_by(&self, segment: &Segment) -> bool {
        self.segments.iter().any(|edge| segment.intersects(edge))
    }
}
