//! Application root for the kitchen engine.
//!
//! [`Kitchen`] is the one state container the presentation layer talks to;
//! everything it exposes is a query or a command over the inventory, the
//! barcode resolver and the meal planner.

pub mod config;
pub mod kitchen;

pub use config::KitchenConfig;
pub use kitchen::{Kitchen, KitchenSnapshot};
