//! Delivery ledger writes.

use anyhow::Result;
use dronepath_core::{DeliveryRecord, FlightStep};
use sqlx::SqlitePool;

pub async fn record_delivery(pool: &SqlitePool, record: &DeliveryRecord) -> Result<()> {
    sqlx::query("INSERT INTO deliveries (order_no, delivered_to, cost_in_pence) VALUES (?1, ?2, ?3)")
        .bind(&record.order_id)
        .bind(&record.dropoff_label)
        .bind(i64::from(record.cost))
        .execute(pool)
        .await?;
    Ok(())
}

/// Append one flightpath row per step, all or nothing.
pub async fn record_flight_steps(pool: &SqlitePool, steps: &[FlightStep]) -> Result<()> {
    let mut tx = pool.begin().await?;
    for step in steps {
        sqlx::query(
            r#"
            INSERT INTO flightpath (
                order_no, from_longitude, from_latitude, angle, to_longitude, to_latitude
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&step.order_id)
        .bind(step.from.lon)
        .bind(step.from.lat)
        .bind(step.bearing)
        .bind(step.to.lon)
        .bind(step.to.lat)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
