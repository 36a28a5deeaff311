//! Pickup ordering for a single order.

use crate::geometry::Coordinate;

/// Order in which to visit an order's pickups before the drop-off.
///
/// With two pickups the one farther from the drop-off goes first, so the
/// final approach leg is the short one. Ties keep the second pickup last.
/// Any other count is returned as given.
pub fn order_pickups(pickups: &[Coordinate], dropoff: &Coordinate) -> Vec<Coordinate> {
    match pickups {
        [first, second] if dropoff.distance_to(first) < dropoff.distance_to(second) => {
            vec![*second, *first]
        }
        _ => pickups.to_vec(),
    }
}

/// Every stop of an order in visiting order: pickups, then the drop-off.
pub fn stops_for(pickups: &[Coordinate], dropoff: &Coordinate) -> Vec<Coordinate> {
    let mut stops = order_pickups(pickups, dropoff);
    stops.push(*dropoff);
    stops
}
