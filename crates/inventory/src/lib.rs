//! Inventory domain: the item repository, barcode resolution and the
//! read-only views the presentation layer renders.
//!
//! All state is in-memory and process-local.

pub mod demo;
pub mod events;
pub mod item;
pub mod projection;
pub mod repository;
pub mod resolver;

pub use events::{InventoryEvent, ItemAdded, ItemRemoved, ItemSource, ItemUpdated};
pub use item::{
    Category, DEFAULT_SHELF_LIFE_DAYS, InventoryItem, ItemDraft, ItemPatch, ItemStatus, NewItem,
    Quantity, Unit,
};
pub use projection::{CategoryGroup, ExpiryLabel, categorize, days_until_expiry, search};
pub use repository::ItemRepository;
pub use resolver::{
    BarcodeCatalog, BarcodeResolver, CatalogError, CatalogRecord, DEFAULT_SCAN_LATENCY,
    InMemoryCatalog, ScanError,
};
