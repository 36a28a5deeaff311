//! Daily delivery run for the drone planner.
//!
//! Reads the day's orders from SQLite, resolves them against the catalog
//! service, flies them through the core session and records the ledger and
//! a GeoJSON trace of the flight.

pub mod config;
pub mod day;
pub mod export;
pub mod persistence;

pub use config::{Args, Config};
pub use day::{run_day, DayReport, LocationCache};
