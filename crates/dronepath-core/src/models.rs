//! Core data models for delivery planning.

use crate::geometry::{Coordinate, HOVER};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most pickups a single order may need.
pub const MAX_PICKUPS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("order {order_id} needs {count} pickups; 1 to 2 are supported")]
    UnsupportedPickupCount { order_id: String, count: usize },
}

/// A customer order ready to be flown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub dropoff: Coordinate,
    /// Location label the drop-off was resolved from
    pub dropoff_label: String,
    /// Unique pickup locations
    pub pickups: Vec<Coordinate>,
    /// Value of the order in pence
    pub cost: u32,
}

impl Order {
    /// Build an order, dropping repeated pickups and enforcing the supported
    /// pickup count.
    pub fn new(
        id: impl Into<String>,
        dropoff: Coordinate,
        dropoff_label: impl Into<String>,
        pickups: Vec<Coordinate>,
        cost: u32,
    ) -> Result<Self, OrderError> {
        let id = id.into();
        let mut unique: Vec<Coordinate> = Vec::with_capacity(pickups.len());
        for pickup in pickups {
            if !unique.contains(&pickup) {
                unique.push(pickup);
            }
        }
        if unique.is_empty() || unique.len() > MAX_PICKUPS {
            return Err(OrderError::UnsupportedPickupCount {
                order_id: id,
                count: unique.len(),
            });
        }
        Ok(Self {
            id,
            dropoff,
            dropoff_label: dropoff_label.into(),
            pickups: unique,
            cost,
        })
    }
}

/// Ledger row written once per committed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub order_id: String,
    pub dropoff_label: String,
    pub cost: u32,
}

/// Ledger row written once per traversed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStep {
    pub order_id: String,
    pub from: Coordinate,
    /// Quantized bearing, or [`HOVER`] when the drone stays put
    pub bearing: i32,
    pub to: Coordinate,
}

impl FlightStep {
    pub fn between(order_id: &str, from: Coordinate, to: Coordinate) -> Self {
        let bearing = if from == to { HOVER } else { from.bearing_to(&to) };
        Self {
            order_id: order_id.to_string(),
            from,
            bearing,
            to,
        }
    }
}
