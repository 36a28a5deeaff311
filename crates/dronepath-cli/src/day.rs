//! One delivery day end to end: load, resolve, fly, record, export.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dronepath_catalog::{CatalogClient, Menus};
use dronepath_core::{Coordinate, DayOutcome, FlightRules, FlightSession, Order};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::export::write_flightpath;
use crate::persistence::{
    init_database, orders_for_date, record_delivery, record_flight_steps, reset_ledger, OrderRow,
};

/// Location labels already resolved during this run.
#[derive(Debug, Default)]
pub struct LocationCache {
    resolved: HashMap<String, Coordinate>,
}

impl LocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, coordinate: Coordinate) {
        self.resolved.insert(label.into(), coordinate);
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Coordinates for `label`, asking the catalog only the first time.
    pub async fn resolve(&mut self, client: &CatalogClient, label: &str) -> Result<Coordinate> {
        if let Some(coordinate) = self.resolved.get(label) {
            return Ok(*coordinate);
        }
        let coordinate = client
            .resolve_location(label)
            .await
            .with_context(|| format!("resolving location {label}"))?;
        self.resolved.insert(label.to_string(), coordinate);
        Ok(coordinate)
    }
}

/// Turn stored orders into plannable ones: price the items and resolve every
/// location label. Orders needing no shop or more shops than a drone can
/// visit are left out of the day.
pub async fn prepare_orders(
    rows: &[OrderRow],
    menus: &Menus,
    cache: &mut LocationCache,
    client: &CatalogClient,
) -> Result<Vec<Order>> {
    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let quote = menus.quote(row.items.as_slice());
        let dropoff = cache.resolve(client, &row.deliver_to).await?;
        let mut pickups = Vec::with_capacity(quote.pickup_labels.len());
        for label in &quote.pickup_labels {
            pickups.push(cache.resolve(client, label).await?);
        }
        match Order::new(&row.order_no, dropoff, &row.deliver_to, pickups, quote.cost) {
            Ok(order) => orders.push(order),
            Err(e) => warn!(order_no = %row.order_no, error = %e, "Skipping unplannable order"),
        }
    }
    Ok(orders)
}

/// Write one delivery row and the flightpath rows for each committed order.
pub async fn record_outcome(pool: &SqlitePool, outcome: &DayOutcome) -> Result<()> {
    for delivery in &outcome.committed {
        record_delivery(pool, &delivery.delivery_record())
            .await
            .with_context(|| format!("recording delivery {}", delivery.order.id))?;
        record_flight_steps(pool, &delivery.flight_steps())
            .await
            .with_context(|| format!("recording flightpath for {}", delivery.order.id))?;
        info!(order_id = %delivery.order.id, cost = delivery.order.cost, "Delivery recorded");
    }
    Ok(())
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct DayReport {
    pub outcome: DayOutcome,
    pub geojson: PathBuf,
}

/// Plan and record every delivery due on `date`.
pub async fn run_day(config: &Config, rules: &FlightRules, date: NaiveDate) -> Result<DayReport> {
    info!(%date, catalog = %config.catalog_url, "Starting delivery run");

    let db = init_database(&config.db_path, 5)
        .await
        .context("opening order database")?;
    reset_ledger(db.pool()).await.context("clearing ledger")?;

    let rows = orders_for_date(db.pool(), date)
        .await
        .with_context(|| format!("loading orders for {date}"))?;
    info!(orders = rows.len(), "Loaded orders");

    let client = CatalogClient::new(&config.catalog_url);
    let menus = client.menus().await.context("fetching menus")?;
    let perimeter = client
        .no_fly_perimeter()
        .await
        .context("fetching no-fly zones")?;

    let mut cache = LocationCache::new();
    let orders = prepare_orders(&rows, &menus, &mut cache, &client).await?;
    info!(locations = cache.len(), "Resolved order locations");

    let outcome = FlightSession::new(rules, perimeter).fly(orders);

    record_outcome(db.pool(), &outcome).await?;
    let geojson = write_flightpath(&config.output_dir, date, &outcome.path)?;
    info!(path = %geojson.display(), "Flightpath exported");

    info!(
        committed = outcome.committed.len(),
        attempted = outcome.orders_attempted,
        pence_captured = outcome.value_captured(),
        pence_available = outcome.value_available,
        percentage = outcome.monetary_value_percentage(),
        moves_remaining = outcome.moves_remaining,
        "Delivery run complete"
    );

    Ok(DayReport { outcome, geojson })
}
