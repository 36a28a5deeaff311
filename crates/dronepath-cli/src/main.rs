//! dronepath - plan, fly and record one day of deliveries.
//!
//! Usage: dronepath <day> <month> <year> [--catalog-url URL] [--db-path PATH]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dronepath_cli::{run_day, Args, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("dronepath=info".parse()?))
        .init();

    let args = Args::parse();
    let date = args.date()?;
    let config = Config::from_env().with_args(&args);
    let rules = config.flight_rules()?;

    let report = run_day(&config, &rules, date).await?;

    println!(
        "{} of {} orders delivered, {:.2}% of monetary value, written to {}",
        report.outcome.committed.len(),
        report.outcome.orders_attempted,
        report.outcome.monetary_value_percentage(),
        report.geojson.display()
    );
    Ok(())
}
