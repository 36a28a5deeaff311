//! Operating rules for a delivery day.

use crate::geometry::{Airspace, Coordinate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the airspace, the base and the move budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRules {
    /// Rectangle every waypoint must stay inside
    pub airspace: Airspace,
    /// Where each day starts and ends
    pub base: Coordinate,
    /// Total moves available for the day
    pub move_budget: u32,
    /// Fallback waypoints used when a leg fails to converge.
    /// The closest one wins; ties go to the earlier entry.
    pub detour_waypoints: Vec<Coordinate>,
    /// A leg holding more waypoints than this is considered stalled
    pub max_leg_waypoints: usize,
    /// How many detours may nest inside one another
    pub max_detour_depth: u32,
}

impl Default for FlightRules {
    fn default() -> Self {
        Self {
            airspace: Airspace::default(),
            base: Coordinate::new(-3.186874, 55.944494),
            move_budget: 1500,
            detour_waypoints: vec![
                Coordinate::new(-3.1879, 55.9452), // north-east
                Coordinate::new(-3.1916, 55.9437), // south-west
            ],
            max_leg_waypoints: 100,
            max_detour_depth: 2,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RulesError {
    #[error("airspace bounds are empty or inverted")]
    EmptyAirspace,
    #[error("base ({lon}, {lat}) lies outside the airspace")]
    BaseOutsideAirspace { lon: f64, lat: f64 },
    #[error("move budget must be positive")]
    NoMoveBudget,
    #[error("max_leg_waypoints must be positive")]
    NoLegAllowance,
}

impl FlightRules {
    pub fn validate(&self) -> Result<(), RulesError> {
        let a = &self.airspace;
        if !(a.min_lon < a.max_lon && a.min_lat < a.max_lat) {
            return Err(RulesError::EmptyAirspace);
        }
        if !a.contains(&self.base) {
            return Err(RulesError::BaseOutsideAirspace {
                lon: self.base.lon,
                lat: self.base.lat,
            });
        }
        if self.move_budget == 0 {
            return Err(RulesError::NoMoveBudget);
        }
        if self.max_leg_waypoints == 0 {
            return Err(RulesError::NoLegAllowance);
        }
        Ok(())
    }

    /// Detour waypoint closest to `from`, if any are configured.
    pub fn nearest_detour(&self, from: &Coordinate) -> Option<Coordinate> {
        self.detour_waypoints
            .iter()
            .copied()
            .min_by(|a, b| from.distance_to(a).total_cmp(&from.distance_to(b)))
    }
}
