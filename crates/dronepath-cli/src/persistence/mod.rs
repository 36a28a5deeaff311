//! SQLite storage for orders and the delivery ledger.

pub mod db;
pub mod ledger;
pub mod orders;

pub use db::{init_database, reset_ledger, Database};
pub use ledger::{record_delivery, record_flight_steps};
pub use orders::{insert_order, orders_for_date, OrderRow};
