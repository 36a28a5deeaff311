//! End-to-end delivery day scenarios.

use dronepath_core::sequencer::stops_for;
use dronepath_core::{
    Attempt, Coordinate, FlightRules, FlightSession, Order, Perimeter, Segment, STEP,
};

fn c(lon: f64, lat: f64) -> Coordinate {
    Coordinate::new(lon, lat)
}

fn session_with_budget(budget: u32, perimeter: Perimeter) -> FlightSession {
    let rules = FlightRules {
        move_budget: budget,
        ..FlightRules::default()
    };
    FlightSession::new(&rules, perimeter)
}

/// Moves an order would cost from `from`, and the moves to fly home after it.
fn costs(session: &FlightSession, from: Coordinate, order: &Order) -> (usize, usize) {
    let planner = session.planner();
    let leg = planner.plan_through(from, &stops_for(&order.pickups, &order.dropoff));
    let home = planner.plan(*leg.last().unwrap(), FlightRules::default().base);
    (leg.len(), home.len())
}

fn assert_path_avoids(path: &[Coordinate], perimeter: &Perimeter) {
    for (i, pair) in path.windows(2).enumerate() {
        let hop = Segment::new(pair[0], pair[1]);
        assert!(
            !perimeter.crossed_by(&hop),
            "move {i} from {:?} to {:?} crosses a no-fly boundary",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_two_affordable_orders_are_both_committed_by_value() {
    let cheap = Order::new(
        "cheap001",
        c(-3.1885, 55.9438),
        "cheap.drop.off",
        vec![c(-3.1870, 55.9445), c(-3.1890, 55.9452)],
        150,
    )
    .unwrap();
    let dear = Order::new(
        "dear0001",
        c(-3.1895, 55.9440),
        "dear.drop.off",
        vec![c(-3.1880, 55.9450)],
        300,
    )
    .unwrap();

    let session = session_with_budget(1500, Perimeter::default());
    let base = FlightRules::default().base;
    let (dear_moves, _) = costs(&session, base, &dear);

    let outcome = session.fly(vec![cheap.clone(), dear.clone()]);

    let committed: Vec<&str> = outcome.committed.iter().map(|d| d.order.id.as_str()).collect();
    assert_eq!(committed, vec!["dear0001", "cheap001"]);
    assert_eq!(outcome.orders_attempted, 2);

    let spent: usize = outcome.committed.iter().map(|d| d.leg.len()).sum();
    assert_eq!(outcome.committed[0].leg.len(), dear_moves);
    assert_eq!(outcome.moves_remaining as usize, 1500 - spent);
    assert_eq!(outcome.value_captured(), 450);
    assert_eq!(outcome.monetary_value_percentage(), 100.0);

    // The second order starts where the first one ended.
    assert_eq!(
        outcome.committed[1].origin,
        *outcome.committed[0].leg.last().unwrap()
    );
    assert!(outcome.path.last().unwrap().close_to(&base));
}

#[test]
fn test_path_around_square_no_fly_zone_never_crosses_it() {
    let (cx, cy, half) = (-3.1885, 55.9444, 0.0003);
    let perimeter = Perimeter::from_polygons([vec![
        c(cx - half, cy - half),
        c(cx + half, cy - half),
        c(cx + half, cy + half),
        c(cx - half, cy + half),
    ]]);
    assert_eq!(perimeter.len(), 4);

    let session = session_with_budget(1500, perimeter.clone());
    let start = c(cx - half - 0.0001, cy);
    let target = c(cx + half + 0.0001, cy);

    let path = session.planner().plan(start, target);
    assert!(path.last().unwrap().close_to(&target));
    assert_path_avoids(&path, &perimeter);
}

#[test]
fn test_whole_day_around_no_fly_zone_stays_clear() {
    let (cx, cy, half) = (-3.1885, 55.9444, 0.0003);
    let perimeter = Perimeter::from_polygons([vec![
        c(cx - half, cy - half),
        c(cx + half, cy - half),
        c(cx + half, cy + half),
        c(cx - half, cy + half),
    ]]);
    let west_pickup = c(cx - half - 0.0004, cy + 0.0001);
    let order = Order::new("wall0001", c(-3.1870, 55.9440), "a.b.c", vec![west_pickup], 500).unwrap();

    let outcome = session_with_budget(1500, perimeter.clone()).fly(vec![order]);
    assert_eq!(outcome.committed.len(), 1);
    assert_path_avoids(&outcome.path, &perimeter);

    let airspace = FlightRules::default().airspace;
    assert!(outcome.path.iter().all(|p| airspace.contains(p)));
}

#[test]
fn test_unaffordable_order_is_skipped_and_cheaper_one_still_flies() {
    let far = Order::new(
        "far00001",
        c(-3.1850, 55.9430),
        "far.drop.off",
        vec![c(-3.1920, 55.9460)],
        500,
    )
    .unwrap();
    let near = Order::new(
        "near0001",
        c(-3.1866, 55.9442),
        "near.drop.off",
        vec![c(-3.1875, 55.9447)],
        100,
    )
    .unwrap();

    let budget = 60;
    let mut session = session_with_budget(budget, Perimeter::default());
    let base = FlightRules::default().base;
    let (far_leg, far_home) = costs(&session, base, &far);
    let (near_leg, near_home) = costs(&session, base, &near);
    assert!(far_leg + far_home >= budget as usize, "far order should not fit");
    assert!(near_leg + near_home < budget as usize, "near order should fit");

    let skipped = session.attempt(&far);
    assert!(matches!(skipped, Attempt::Skipped { .. }));
    assert_eq!(session.state().moves_remaining, budget);
    assert_eq!(session.state().position, base);
    assert!(session.state().path.is_empty());
    assert!(session.state().committed.is_empty());

    let committed = session.attempt(&near);
    assert_eq!(
        committed,
        Attempt::Committed {
            moves_spent: near_leg,
            moves_remaining: budget - near_leg as u32,
        }
    );

    let outcome = session.finish();
    assert_eq!(outcome.committed.len(), 1);
    assert_eq!(outcome.committed[0].order.id, "near0001");
    assert_eq!(outcome.value_available, 600);
    assert!((outcome.monetary_value_percentage() - 100.0 / 6.0).abs() < 1e-9);
}

#[test]
fn test_schedule_order_drives_the_skip() {
    // The valuable far order is attempted first and skipped; the cheap one
    // after it is still committed.
    let far = Order::new("far00001", c(-3.1850, 55.9430), "f.a.r", vec![c(-3.1920, 55.9460)], 500)
        .unwrap();
    let near = Order::new("near0001", c(-3.1866, 55.9442), "n.e.a", vec![c(-3.1875, 55.9447)], 100)
        .unwrap();

    let outcome = session_with_budget(60, Perimeter::default()).fly(vec![near, far]);
    assert_eq!(outcome.orders_attempted, 2);
    let committed: Vec<&str> = outcome.committed.iter().map(|d| d.order.id.as_str()).collect();
    assert_eq!(committed, vec!["near0001"]);
}

#[test]
fn test_closing_leg_comes_from_last_evaluated_order() {
    // The cheap far order is evaluated last and skipped, so the closing leg
    // is the one computed from its hypothetical drop-off.
    let near = Order::new("near0001", c(-3.1866, 55.9442), "n.e.a", vec![c(-3.1875, 55.9447)], 300)
        .unwrap();
    let far = Order::new("far00001", c(-3.1850, 55.9430), "f.a.r", vec![c(-3.1920, 55.9460)], 100)
        .unwrap();

    let outcome = session_with_budget(60, Perimeter::default()).fly(vec![far.clone(), near]);
    assert_eq!(outcome.committed.len(), 1);

    let flown: usize = outcome.committed.iter().map(|d| d.leg.len()).sum();
    let closing_start = outcome.path[flown];
    let committed_end = *outcome.committed[0].leg.last().unwrap();
    assert!(closing_start.close_to(&far.dropoff));
    assert!(closing_start.distance_to(&committed_end) > STEP);
}
