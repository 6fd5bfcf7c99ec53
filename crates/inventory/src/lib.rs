//! Inventory domain module.
//!
//! An in-memory mapping from item name to stock level, with validated mutation,
//! low-stock queries, whole-file JSON persistence and a plain-text report.
//! The store is an explicit value: callers own it and pass it around.

pub mod activity;
pub mod item;
pub mod persistence;
pub mod report;
pub mod store;

pub use activity::ActivityLog;
pub use item::{ItemName, Quantity};
pub use persistence::{DEFAULT_INVENTORY_FILE, LoadOutcome, PersistenceError};
pub use report::InventoryReport;
pub use store::{DEFAULT_LOW_STOCK_THRESHOLD, InventoryStore, Removal};
