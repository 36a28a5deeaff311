//! One day of deliveries against a fixed move budget.
//!
//! The session starts at base, evaluates orders in schedule order and commits
//! each one only if enough moves would remain to fly home afterwards. Skipped
//! orders leave the state untouched and never stop the evaluation of cheaper
//! orders further down the schedule.

use crate::geometry::Coordinate;
use crate::models::{DeliveryRecord, FlightStep, Order};
use crate::navigator::Navigator;
use crate::perimeter::Perimeter;
use crate::planner::PathPlanner;
use crate::rules::FlightRules;
use crate::scheduler::{schedule, total_value};
use crate::sequencer::stops_for;

/// Where the drone is in its day.
///
/// A session moves from `AtBase` to `Delivering` on its first commit; closing
/// the day flies home and leaves the outcome `AtBase` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    /// At base, before the first commit or after the day is closed
    AtBase,
    /// At least one order committed and the drone has not flown home yet
    Delivering,
}

/// Mutable state threaded through the day.
#[derive(Debug, Clone)]
pub struct FlightState {
    pub position: Coordinate,
    pub moves_remaining: u32,
    /// Every waypoint flown so far
    pub path: Vec<Coordinate>,
    pub committed: Vec<CommittedDelivery>,
}

impl FlightState {
    pub fn at_base(rules: &FlightRules) -> Self {
        Self {
            position: rules.base,
            moves_remaining: rules.move_budget,
            path: Vec::new(),
            committed: Vec::new(),
        }
    }
}

/// An order that made it into the day's flight.
#[derive(Debug, Clone)]
pub struct CommittedDelivery {
    pub order: Order,
    /// Position the drone left from for this order
    pub origin: Coordinate,
    /// Waypoints flown for this order, pickups through drop-off
    pub leg: Vec<Coordinate>,
}

impl CommittedDelivery {
    pub fn delivery_record(&self) -> DeliveryRecord {
        DeliveryRecord {
            order_id: self.order.id.clone(),
            dropoff_label: self.order.dropoff_label.clone(),
            cost: self.order.cost,
        }
    }

    /// One ledger step per waypoint of the leg, starting from the origin.
    pub fn flight_steps(&self) -> Vec<FlightStep> {
        let mut previous = self.origin;
        self.leg
            .iter()
            .map(|next| {
                let step = FlightStep::between(&self.order.id, previous, *next);
                previous = *next;
                step
            })
            .collect()
    }
}

/// Result of evaluating a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Committed {
        moves_spent: usize,
        moves_remaining: u32,
    },
    Skipped {
        moves_needed: usize,
        return_moves: usize,
        moves_remaining: u32,
    },
}

/// Final state of a completed day.
#[derive(Debug, Clone)]
pub struct DayOutcome {
    /// Full flight, including the closing leg home
    pub path: Vec<Coordinate>,
    pub committed: Vec<CommittedDelivery>,
    pub moves_remaining: u32,
    /// Always `AtBase` once the day is closed
    pub phase: FlightPhase,
    pub orders_attempted: usize,
    /// Pence on offer across every attempted order
    pub value_available: u64,
}

impl DayOutcome {
    pub fn value_captured(&self) -> u64 {
        self.committed
            .iter()
            .map(|delivery| u64::from(delivery.order.cost))
            .sum()
    }

    /// Captured value as a percentage of what was on offer.
    pub fn monetary_value_percentage(&self) -> f64 {
        if self.value_available == 0 {
            return 0.0;
        }
        self.value_captured() as f64 / self.value_available as f64 * 100.0
    }
}

/// Drives one day of deliveries.
#[derive(Debug, Clone)]
pub struct FlightSession {
    planner: PathPlanner,
    base: Coordinate,
    state: FlightState,
    phase: FlightPhase,
    /// Return leg computed for the most recently evaluated order
    closing_leg: Option<Vec<Coordinate>>,
    orders_attempted: usize,
    value_available: u64,
}

impl FlightSession {
    pub fn new(rules: &FlightRules, perimeter: Perimeter) -> Self {
        let navigator = Navigator::new(perimeter, rules.airspace);
        Self {
            planner: PathPlanner::new(navigator, rules),
            base: rules.base,
            state: FlightState::at_base(rules),
            phase: FlightPhase::AtBase,
            closing_leg: None,
            orders_attempted: 0,
            value_available: 0,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    /// Evaluate one order and commit it if the budget allows a return home.
    pub fn attempt(&mut self, order: &Order) -> Attempt {
        let origin = self.state.position;
        let stops = stops_for(&order.pickups, &order.dropoff);
        let leg = self.planner.plan_through(origin, &stops);
        let end = leg.last().copied().unwrap_or(origin);
        let return_leg = self.planner.plan(end, self.base);

        let moves_spent = leg.len();
        let return_moves = return_leg.len();
        let left_after = i64::from(self.state.moves_remaining) - moves_spent as i64;

        self.orders_attempted += 1;
        self.value_available += u64::from(order.cost);
        self.closing_leg = Some(return_leg);

        if left_after <= return_moves as i64 {
            tracing::debug!(
                order_id = %order.id,
                moves_spent,
                return_moves,
                moves_remaining = self.state.moves_remaining,
                "Skipping order, not enough moves to return"
            );
            return Attempt::Skipped {
                moves_needed: moves_spent,
                return_moves,
                moves_remaining: self.state.moves_remaining,
            };
        }

        // left_after > return_moves >= 0, and it started from a u32
        self.state.moves_remaining = left_after as u32;
        self.state.position = end;
        self.state.path.extend_from_slice(&leg);
        self.state.committed.push(CommittedDelivery {
            order: order.clone(),
            origin,
            leg,
        });
        self.phase = FlightPhase::Delivering;

        tracing::debug!(
            order_id = %order.id,
            cost = order.cost,
            moves_spent,
            moves_remaining = self.state.moves_remaining,
            "Committed order"
        );
        Attempt::Committed {
            moves_spent,
            moves_remaining: self.state.moves_remaining,
        }
    }

    /// Close the day by appending the return leg and landing at base.
    ///
    /// The appended leg is the one computed for the last evaluated order,
    /// committed or not. When that order was skipped the leg starts from its
    /// hypothetical end point rather than the drone's actual position.
    pub fn finish(self) -> DayOutcome {
        let FlightSession {
            state,
            closing_leg,
            orders_attempted,
            value_available,
            ..
        } = self;
        let mut path = state.path;
        if let Some(leg) = closing_leg {
            path.extend(leg);
        }
        DayOutcome {
            path,
            committed: state.committed,
            moves_remaining: state.moves_remaining,
            phase: FlightPhase::AtBase,
            orders_attempted,
            value_available,
        }
    }

    /// Schedule the orders, attempt each in turn and close the day.
    pub fn fly(mut self, orders: Vec<Order>) -> DayOutcome {
        let scheduled = schedule(orders);
        tracing::info!(
            orders = scheduled.len(),
            value = total_value(&scheduled),
            "Starting delivery day"
        );
        for order in &scheduled {
            self.attempt(order);
        }
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HOVER;

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    fn order(id: &str, pickup: Coordinate, dropoff: Coordinate, cost: u32) -> Order {
        Order::new(id, dropoff, format!("{id}.drop.off"), vec![pickup], cost).unwrap()
    }

    fn open_session(budget: u32) -> FlightSession {
        let rules = FlightRules {
            move_budget: budget,
            ..FlightRules::default()
        };
        FlightSession::new(&rules, Perimeter::default())
    }

    #[test]
    fn test_starts_at_base_with_full_budget() {
        let session = open_session(1500);
        let rules = FlightRules::default();
        assert_eq!(session.phase(), FlightPhase::AtBase);
        assert_eq!(session.state().position, rules.base);
        assert_eq!(session.state().moves_remaining, 1500);
        assert!(session.state().path.is_empty());
    }

    #[test]
    fn test_commit_updates_state() {
        let mut session = open_session(1500);
        let o = order("o1", c(-3.1880, 55.9450), c(-3.1900, 55.9440), 300);

        let attempt = session.attempt(&o);
        let Attempt::Committed { moves_spent, moves_remaining } = attempt else {
            panic!("expected commit, got {attempt:?}");
        };
        let state = session.state();
        assert_eq!(moves_remaining, 1500 - moves_spent as u32);
        assert_eq!(state.moves_remaining, moves_remaining);
        assert_eq!(state.path.len(), moves_spent);
        assert_eq!(Some(&state.position), state.path.last());
        assert!(state.position.close_to(&o.dropoff));
        assert_eq!(session.phase(), FlightPhase::Delivering);
    }

    #[test]
    fn test_exact_return_budget_is_not_enough() {
        let probe = open_session(1500);
        let base = FlightRules::default().base;
        let o = order("o1", c(-3.1880, 55.9450), c(-3.1900, 55.9440), 300);
        let leg = probe
            .planner()
            .plan_through(base, &stops_for(&o.pickups, &o.dropoff));
        let back = probe.planner().plan(*leg.last().unwrap(), base);
        let exact = (leg.len() + back.len()) as u32;

        let mut tight = open_session(exact);
        assert!(matches!(tight.attempt(&o), Attempt::Skipped { .. }));

        let mut enough = open_session(exact + 1);
        assert!(matches!(enough.attempt(&o), Attempt::Committed { .. }));
    }

    #[test]
    fn test_flight_steps_start_from_origin() {
        let mut session = open_session(1500);
        let o = order("o1", c(-3.1880, 55.9450), c(-3.1900, 55.9440), 300);
        session.attempt(&o);

        let delivery = &session.state().committed[0];
        let steps = delivery.flight_steps();
        assert_eq!(steps.len(), delivery.leg.len());
        assert_eq!(steps[0].from, delivery.origin);
        // The leg repeats its origin first, so the opening step hovers.
        assert_eq!(steps[0].bearing, HOVER);
        for pair in steps.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert!(steps.iter().all(|s| s.order_id == "o1"));

        let record = delivery.delivery_record();
        assert_eq!(record.cost, 300);
        assert_eq!(record.dropoff_label, "o1.drop.off");
    }

    #[test]
    fn test_finish_without_orders_leaves_empty_path() {
        let outcome = open_session(1500).finish();
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.phase, FlightPhase::AtBase);
        assert_eq!(outcome.orders_attempted, 0);
        assert_eq!(outcome.monetary_value_percentage(), 0.0);
    }

    #[test]
    fn test_finish_appends_return_home() {
        let mut session = open_session(1500);
        session.attempt(&order("o1", c(-3.1880, 55.9450), c(-3.1900, 55.9440), 300));
        let flown = session.state().path.len();
        assert_eq!(session.phase(), FlightPhase::Delivering);
        let outcome = session.finish();

        assert_eq!(outcome.phase, FlightPhase::AtBase);
        let base = FlightRules::default().base;
        assert!(outcome.path.len() > flown);
        assert!(outcome.path.last().unwrap().close_to(&base));
        assert_eq!(outcome.value_captured(), 300);
        assert_eq!(outcome.monetary_value_percentage(), 100.0);
    }
}
