//! Catalog client - read-only access to the delivery catalog service.
//!
//! Resolves location labels to coordinates, prices menu items and loads the
//! no-fly zones the planner must avoid.

pub mod client;
pub mod error;
pub mod menus;
pub mod zones;

pub use client::{location_path, CatalogClient};
pub use error::CatalogError;
pub use menus::{ItemQuote, Menus, Shop, DELIVERY_CHARGE_PENCE};
pub use zones::parse_no_fly_zones;
