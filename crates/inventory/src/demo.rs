//! Demo pantry contents and barcode catalog.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};

use crate::item::{Category, ItemStatus, NewItem, Quantity, Unit};
use crate::resolver::{CatalogRecord, InMemoryCatalog};

struct Seed {
    name: &'static str,
    quantity: u32,
    unit: Unit,
    category: Category,
    expires_in_days: i64,
    added_days_ago: i64,
    status: ItemStatus,
    barcode: &'static str,
}

const SEED_ITEMS: [Seed; 5] = [
    Seed {
        name: "Milk",
        quantity: 1,
        unit: Unit::Gallon,
        category: Category::Dairy,
        expires_in_days: 7,
        added_days_ago: 2,
        status: ItemStatus::Medium,
        barcode: "123456789012",
    },
    Seed {
        name: "Eggs",
        quantity: 12,
        unit: Unit::Piece,
        category: Category::Dairy,
        expires_in_days: 14,
        added_days_ago: 1,
        status: ItemStatus::High,
        barcode: "223456789012",
    },
    Seed {
        name: "Bread",
        quantity: 1,
        unit: Unit::Piece,
        category: Category::Bakery,
        expires_in_days: 3,
        added_days_ago: 1,
        status: ItemStatus::Low,
        barcode: "323456789012",
    },
    Seed {
        name: "Apples",
        quantity: 5,
        unit: Unit::Piece,
        category: Category::Fruits,
        expires_in_days: 10,
        added_days_ago: 3,
        status: ItemStatus::Medium,
        barcode: "423456789012",
    },
    Seed {
        name: "Chicken Breast",
        quantity: 2,
        unit: Unit::Pound,
        category: Category::Meat,
        expires_in_days: 2,
        added_days_ago: 1,
        status: ItemStatus::Low,
        barcode: "523456789012",
    },
];

/// Starter inventory, dated relative to `now`.
pub fn demo_items(now: DateTime<Utc>) -> Vec<NewItem> {
    SEED_ITEMS
        .iter()
        .map(|seed| NewItem {
            name: seed.name.to_string(),
            quantity: Quantity::whole(seed.quantity),
            unit: seed.unit,
            category: seed.category,
            expiry_date: now + Duration::days(seed.expires_in_days),
            added_date: now - Duration::days(seed.added_days_ago),
            status: seed.status,
            barcode: Some(seed.barcode.to_string()),
        })
        .collect()
}

/// The two products the demo scanner knows about.
pub fn demo_catalog(latency: StdDuration) -> InMemoryCatalog {
    InMemoryCatalog::new(latency)
        .with_record(CatalogRecord {
            barcode: "123456789012".to_string(),
            name: "Milk".to_string(),
            quantity: Quantity::whole(1),
            unit: Unit::Gallon,
            category: Category::Dairy,
            status: ItemStatus::High,
            shelf_life_days: 7,
        })
        .with_record(CatalogRecord {
            barcode: "223456789012".to_string(),
            name: "Eggs".to_string(),
            quantity: Quantity::whole(12),
            unit: Unit::Piece,
            category: Category::Dairy,
            status: ItemStatus::High,
            shelf_life_days: 14,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn demo_items_are_dated_relative_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let items = demo_items(now);

        assert_eq!(items.len(), 5);
        let bread = items.iter().find(|i| i.name == "Bread").unwrap();
        assert_eq!(bread.expiry_date, now + Duration::days(3));
        assert_eq!(bread.added_date, now - Duration::days(1));
    }

    #[test]
    fn demo_catalog_knows_milk_and_eggs() {
        let catalog = demo_catalog(StdDuration::ZERO);
        assert_eq!(catalog.len(), 2);
    }
}
