//! Greedy order scheduling.

use crate::models::Order;

/// Highest-value orders first.
///
/// Stable, so orders of equal cost keep their incoming relative order.
/// Distance and pickup count play no part.
pub fn schedule(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.cost.cmp(&a.cost));
    orders
}

/// Total value of a set of orders in pence.
pub fn total_value(orders: &[Order]) -> u64 {
    orders.iter().map(|order| u64::from(order.cost)).sum()
}
