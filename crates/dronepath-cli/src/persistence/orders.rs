//! Order source queries.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

/// An order as stored, before its labels and items are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order_no: String,
    pub customer: String,
    /// Location label of the drop-off
    pub deliver_to: String,
    pub items: Vec<String>,
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Orders due on `date`, in the order they were placed.
pub async fn orders_for_date(pool: &SqlitePool, date: NaiveDate) -> Result<Vec<OrderRow>> {
    let rows = sqlx::query(
        "SELECT order_no, customer, deliver_to FROM orders WHERE delivery_date = ?1 ORDER BY rowid",
    )
    .bind(date_key(date))
    .fetch_all(pool)
    .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let order_no: String = row.try_get("order_no")?;
        let items: Vec<String> =
            sqlx::query_scalar("SELECT item FROM order_details WHERE order_no = ?1 ORDER BY rowid")
                .bind(&order_no)
                .fetch_all(pool)
                .await?;
        orders.push(OrderRow {
            order_no,
            customer: row.try_get("customer")?,
            deliver_to: row.try_get("deliver_to")?,
            items,
        });
    }
    Ok(orders)
}

/// Store an order and its items.
pub async fn insert_order(pool: &SqlitePool, date: NaiveDate, order: &OrderRow) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO orders (order_no, delivery_date, customer, deliver_to) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&order.order_no)
    .bind(date_key(date))
    .bind(&order.customer)
    .bind(&order.deliver_to)
    .execute(&mut *tx)
    .await?;

    for item in &order.items {
        sqlx::query("INSERT INTO order_details (order_no, item) VALUES (?1, ?2)")
            .bind(&order.order_no)
            .bind(item)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
