//! SQLite pool setup, schema and ledger reset.

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

const SCHEMA: &str = include_str!("../../migrations/001_init.sql");

/// Shared handle on the order store and ledger.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Connection URL for a database file, or an in-memory store for `:memory:`.
fn database_url(db_path: &str) -> String {
    if db_path == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{}?mode=rwc", db_path)
    }
}

/// Schema statements with `--` comment lines removed.
fn schema_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|chunk| {
            chunk
                .lines()
                .filter(|line| !line.trim_start().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Open the order store, creating the file and schema when missing.
pub async fn init_database(db_path: &str, max_connections: u32) -> Result<Database> {
    if db_path != ":memory:" {
        if let Some(parent) = Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating database directory {}", parent.display()))?;
        }
    }

    info!(db_path, "Opening order store");
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url(db_path))
        .await?;

    apply_schema(&pool).await?;
    Ok(Database { pool })
}

async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    let statements = schema_statements(SCHEMA);
    for statement in &statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("applying schema statement: {statement}"))?;
    }
    info!(statements = statements.len(), "Schema ready");
    Ok(())
}

/// Empty the delivery and flightpath tables so a run starts from a clean
/// ledger. Orders are left alone.
pub async fn reset_ledger(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM deliveries").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM flightpath").execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}
