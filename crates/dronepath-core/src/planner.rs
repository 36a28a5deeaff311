//! Step-by-step path planning between two points.
//!
//! A leg is walked one STEP at a time along the navigator's bearing until the
//! drone is close to the target, then the last position is repeated once as a
//! hover marker. Legs that stall (too many waypoints without arriving) are
//! replaced by a two-leg detour through the nearest configured waypoint.

use crate::geometry::Coordinate;
use crate::navigator::Navigator;
use crate::rules::FlightRules;

/// Outcome of walking a single leg.
enum Walk {
    Arrived(Vec<Coordinate>),
    Stalled(Vec<Coordinate>),
}

/// Produces fixed-step waypoint sequences.
#[derive(Debug, Clone)]
pub struct PathPlanner {
    navigator: Navigator,
    rules: FlightRules,
}

impl PathPlanner {
    pub fn new(navigator: Navigator, rules: &FlightRules) -> Self {
        Self {
            navigator,
            rules: rules.clone(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Waypoints from `from` to near `to`.
    ///
    /// The sequence starts with `from` and ends with a duplicated hover
    /// waypoint. Its length is the number of moves the leg costs.
    pub fn plan(&self, from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
        self.plan_within(from, to, self.rules.max_detour_depth)
    }

    /// Concatenated legs visiting each stop in turn.
    pub fn plan_through(&self, from: Coordinate, stops: &[Coordinate]) -> Vec<Coordinate> {
        let mut path = Vec::new();
        let mut current = from;
        for stop in stops {
            let leg = self.plan(current, *stop);
            if let Some(last) = leg.last() {
                current = *last;
            }
            path.extend(leg);
        }
        path
    }

    fn plan_within(&self, from: Coordinate, to: Coordinate, detours_left: u32) -> Vec<Coordinate> {
        let stalled = match self.walk(from, to) {
            Walk::Arrived(path) => return path,
            Walk::Stalled(path) => path,
        };

        let via = match self.rules.nearest_detour(&from) {
            Some(via) if detours_left > 0 => via,
            _ => {
                tracing::warn!(
                    from_lon = from.lon,
                    from_lat = from.lat,
                    to_lon = to.lon,
                    to_lat = to.lat,
                    "Leg stalled with no detour left, keeping partial path"
                );
                return with_hover(stalled);
            }
        };

        tracing::warn!(
            from_lon = from.lon,
            from_lat = from.lat,
            via_lon = via.lon,
            via_lat = via.lat,
            detours_left,
            "Leg stalled, detouring"
        );
        let mut path = self.plan_within(from, via, detours_left - 1);
        path.extend(self.plan_within(via, to, detours_left - 1));
        path
    }

    fn walk(&self, from: Coordinate, to: Coordinate) -> Walk {
        let mut path = vec![from];
        let mut current = from;
        loop {
            if path.len() > self.rules.max_leg_waypoints {
                return Walk::Stalled(path);
            }
            if current.close_to(&to) {
                return Walk::Arrived(with_hover(path));
            }
            let bearing = self.navigator.choose_bearing(&current, &to);
            current = current.advance(bearing);
            path.push(current);
        }
    }
}

fn with_hover(mut path: Vec<Coordinate>) -> Vec<Coordinate> {
    if let Some(last) = path.last().copied() {
        path.push(last);
    }
    path
}
