//! Barcode resolution: scanned code → catalog record → new inventory item.
//!
//! The catalog sits behind [`BarcodeCatalog`] so a real product database can
//! replace the in-memory one without touching the resolver. Lookups are async
//! and may take a while; the resolver never serializes them, so several scans
//! can be in flight at once and complete in any order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pantry_core::{Clock, ValueObject};

use crate::events::ItemSource;
use crate::item::{Category, InventoryItem, ItemStatus, NewItem, Quantity, Unit};
use crate::repository::ItemRepository;

/// Simulated round trip of the demo catalog.
pub const DEFAULT_SCAN_LATENCY: Duration = Duration::from_millis(1000);

/// Template for items created from a barcode.
///
/// Expiry is stored as a shelf life so that every scan produces a date
/// relative to the moment of scanning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub barcode: String,
    pub name: String,
    pub quantity: Quantity,
    pub unit: Unit,
    pub category: Category,
    pub status: ItemStatus,
    pub shelf_life_days: i64,
}

impl CatalogRecord {
    /// Build repository input for an item scanned at `now`.
    ///
    /// `None` when the shelf life pushes the expiry date out of range.
    pub fn instantiate(&self, now: DateTime<Utc>) -> Option<NewItem> {
        let expiry_date = TimeDelta::try_days(self.shelf_life_days)
            .and_then(|shelf_life| now.checked_add_signed(shelf_life))?;
        Some(NewItem {
            name: self.name.clone(),
            quantity: self.quantity,
            unit: self.unit,
            category: self.category,
            expiry_date,
            added_date: now,
            status: self.status,
            barcode: Some(self.barcode.clone()),
        })
    }
}

impl ValueObject for CatalogRecord {}

/// Backend failure while talking to a catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("catalog lookup failed: {0}")]
pub struct CatalogError(pub String);

/// Read-only barcode → record source.
#[async_trait]
pub trait BarcodeCatalog: Send + Sync + core::fmt::Debug {
    /// `Ok(None)` means the barcode is simply unknown.
    async fn lookup(&self, barcode: &str) -> Result<Option<CatalogRecord>, CatalogError>;
}

/// In-memory catalog with a fixed artificial delay per lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: HashMap<String, CatalogRecord>,
    latency: Duration,
}

impl InMemoryCatalog {
    pub fn new(latency: Duration) -> Self {
        Self {
            records: HashMap::new(),
            latency,
        }
    }

    pub fn with_record(mut self, record: CatalogRecord) -> Self {
        self.insert(record);
        self
    }

    pub fn insert(&mut self, record: CatalogRecord) {
        self.records.insert(record.barcode.clone(), record);
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl BarcodeCatalog for InMemoryCatalog {
    async fn lookup(&self, barcode: &str) -> Result<Option<CatalogRecord>, CatalogError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.records.get(barcode).cloned())
    }
}

/// Why a scan produced no item. Display strings are user-facing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Product not found. Please add it manually.")]
    NotFound { barcode: String },

    #[error("Failed to scan item. Please try again.")]
    Lookup(String),
}

/// Resolves barcodes and inserts the resulting items.
#[derive(Debug)]
pub struct BarcodeResolver {
    catalog: Arc<dyn BarcodeCatalog>,
    repository: Arc<ItemRepository>,
    clock: Arc<dyn Clock>,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<ScanError>>,
}

/// Decrements the in-flight counter however the scan future ends.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl BarcodeResolver {
    pub fn new(
        catalog: Arc<dyn BarcodeCatalog>,
        repository: Arc<ItemRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            repository,
            clock,
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        }
    }

    /// Look up `barcode`; on a hit, add a fresh item to the repository and
    /// return it. A miss or a lookup failure leaves the repository untouched.
    pub async fn scan(&self, barcode: &str) -> Result<InventoryItem, ScanError> {
        let _guard = InFlight::enter(&self.in_flight);
        self.set_last_error(None);
        tracing::debug!(barcode, "scan started");

        let result = match self.catalog.lookup(barcode).await {
            Ok(Some(record)) => match record.instantiate(self.clock.now()) {
                Some(fields) => {
                    let item = self.repository.insert(fields, ItemSource::Scan);
                    tracing::info!(
                        barcode,
                        item_id = %item.id_typed(),
                        name = item.name(),
                        "scan resolved"
                    );
                    Ok(item)
                }
                None => {
                    tracing::warn!(
                        barcode,
                        shelf_life_days = record.shelf_life_days,
                        "scan failed: shelf life out of range"
                    );
                    Err(ScanError::Lookup(format!(
                        "shelf life of {} days is out of range",
                        record.shelf_life_days
                    )))
                }
            },
            Ok(None) => {
                tracing::info!(barcode, "scan missed: barcode not in catalog");
                Err(ScanError::NotFound {
                    barcode: barcode.to_string(),
                })
            }
            Err(err) => {
                tracing::warn!(barcode, %err, "scan failed");
                Err(ScanError::Lookup(err.0))
            }
        };

        if let Err(err) = &result {
            self.set_last_error(Some(err.clone()));
        }
        result
    }

    /// True while at least one scan is pending.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn pending_scans(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Outcome of the most recently finished failed scan, cleared when a new
    /// scan starts.
    pub fn last_error(&self) -> Option<ScanError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_last_error(&self, err: Option<ScanError>) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = err;
    }
}
