//! Core planning logic for the delivery drone.
//!
//! Everything here is synchronous and free of I/O: geometry, obstacle
//! avoidance, fixed-step path planning, order scheduling and the per-day
//! flight session.

pub mod geometry;
pub mod models;
pub mod navigator;
pub mod perimeter;
pub mod planner;
pub mod rules;
pub mod scheduler;
pub mod sequencer;
pub mod session;

pub use geometry::{segments_intersect, Airspace, Coordinate, Segment, HOVER, STEP};
pub use models::{DeliveryRecord, FlightStep, Order, OrderError, MAX_PICKUPS};
pub use navigator::Navigator;
pub use perimeter::Perimeter;
pub use planner::PathPlanner;
pub use rules::{FlightRules, RulesError};
pub use scheduler::schedule;
pub use sequencer::order_pickups;
pub use session::{Attempt, CommittedDelivery, DayOutcome, FlightPhase, FlightSession, FlightState};
