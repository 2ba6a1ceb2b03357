//! Read-only views over inventory items.
//!
//! Everything here is recomputed per query from a snapshot; nothing mutates
//! the repository and nothing is cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::{Category, InventoryItem};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Case-insensitive substring match against name OR category.
///
/// An empty term matches every item.
pub fn search(items: &[InventoryItem], term: &str) -> Vec<InventoryItem> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.name().to_lowercase().contains(&needle)
                || item.category().as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// One category's worth of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub items: Vec<InventoryItem>,
}

/// Group items by category.
///
/// Groups appear in the order their category is first seen; items keep their
/// relative order inside a group. Every input item lands in exactly one group.
pub fn categorize(items: &[InventoryItem]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category()) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(CategoryGroup {
                category: item.category(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// `ceil((expiry_date - now) / 1 day)`, may be zero or negative.
pub fn days_until_expiry(item: &InventoryItem, now: DateTime<Utc>) -> i64 {
    let delta = item.expiry_date() - now;
    let seconds = delta.num_seconds();
    // Both parts share the sign of `delta`. Truncation toward zero is already
    // the ceiling for negatives.
    let days = seconds / SECONDS_PER_DAY;
    let remainder = seconds % SECONDS_PER_DAY;
    if remainder > 0 || (remainder == 0 && delta.subsec_nanos() > 0) {
        days + 1
    } else {
        days
    }
}

/// Freshness badge text. Purely presentational; never touches `status`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum ExpiryLabel {
    Expired,
    ExpiresTomorrow,
    ExpiresIn(i64),
}

impl ExpiryLabel {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 0 => ExpiryLabel::Expired,
            1 => ExpiryLabel::ExpiresTomorrow,
            d => ExpiryLabel::ExpiresIn(d),
        }
    }

    pub fn for_item(item: &InventoryItem, now: DateTime<Utc>) -> Self {
        Self::from_days(days_until_expiry(item, now))
    }
}

impl core::fmt::Display for ExpiryLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExpiryLabel::Expired => f.write_str("Expired"),
            ExpiryLabel::ExpiresTomorrow => f.write_str("Expires tomorrow"),
            ExpiryLabel::ExpiresIn(days) => write!(f, "Expires in {days} days"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemStatus, NewItem, Quantity, Unit};
    use chrono::{Duration, TimeZone};
    use pantry_core::ItemId;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn item(name: &str, category: Category, expiry: DateTime<Utc>) -> InventoryItem {
        InventoryItem::create(
            ItemId::new(),
            NewItem {
                name: name.to_string(),
                quantity: Quantity::whole(1),
                unit: Unit::Piece,
                category,
                expiry_date: expiry,
                added_date: test_time(),
                status: ItemStatus::Fresh,
                barcode: None,
            },
        )
    }

    fn fridge() -> Vec<InventoryItem> {
        let t = test_time();
        vec![
            item("Milk", Category::Dairy, t),
            item("Bread", Category::Bakery, t),
            item("Eggs", Category::Dairy, t),
            item("Apples", Category::Fruits, t),
        ]
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let found = search(&fridge(), "mIlK");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Milk");
    }

    #[test]
    fn search_matches_category() {
        let names: Vec<_> = search(&fridge(), "dairy")
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["Milk", "Eggs"]);
    }

    #[test]
    fn empty_search_matches_all() {
        let items = fridge();
        assert_eq!(search(&items, ""), items);
    }

    #[test]
    fn search_without_match_is_empty() {
        assert!(search(&fridge(), "caviar").is_empty());
    }

    #[test]
    fn categorize_groups_in_first_seen_order() {
        let items = fridge();
        let groups = categorize(&items);

        let cats: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(cats, vec![Category::Dairy, Category::Bakery, Category::Fruits]);

        let dairy: Vec<_> = groups[0].items.iter().map(|i| i.name()).collect();
        assert_eq!(dairy, vec!["Milk", "Eggs"]);
    }

    #[test]
    fn categorize_empty_is_empty() {
        assert!(categorize(&[]).is_empty());
    }

    #[test]
    fn expiry_labels_for_scenarios() {
        let now = test_time();
        let cases = [
            (now - Duration::days(1), "Expired"),
            (now, "Expired"),
            (now + Duration::days(1), "Expires tomorrow"),
            (now + Duration::days(5), "Expires in 5 days"),
        ];
        for (expiry, expected) in cases {
            let it = item("x", Category::Other, expiry);
            assert_eq!(ExpiryLabel::for_item(&it, now).to_string(), expected);
        }
    }

    #[test]
    fn partial_days_round_up() {
        let now = test_time();
        let it = item("x", Category::Other, now + Duration::hours(30));
        assert_eq!(days_until_expiry(&it, now), 2);

        let it = item("x", Category::Other, now + Duration::hours(1));
        assert_eq!(days_until_expiry(&it, now), 1);

        let it = item("x", Category::Other, now - Duration::hours(36));
        assert_eq!(days_until_expiry(&it, now), -1);
    }

    #[test]
    fn sub_millisecond_remainder_still_rounds_up() {
        let now = test_time();
        let it = item(
            "x",
            Category::Other,
            now + Duration::days(1) + Duration::microseconds(500),
        );
        assert_eq!(days_until_expiry(&it, now), 2);
        assert_eq!(ExpiryLabel::for_item(&it, now), ExpiryLabel::ExpiresIn(2));

        let it = item("x", Category::Other, now + Duration::nanoseconds(1));
        assert_eq!(days_until_expiry(&it, now), 1);

        let it = item("x", Category::Other, now - Duration::nanoseconds(1));
        assert_eq!(days_until_expiry(&it, now), 0);

        let it = item(
            "x",
            Category::Other,
            now - Duration::days(1) - Duration::nanoseconds(1),
        );
        assert_eq!(days_until_expiry(&it, now), -1);
    }

    #[test]
    fn label_ignores_status() {
        let now = test_time();
        // Status says fresh, but the date says otherwise; both are kept as-is.
        let it = item("Yogurt", Category::Dairy, now - Duration::days(2));
        assert_eq!(it.status(), ItemStatus::Fresh);
        assert_eq!(ExpiryLabel::for_item(&it, now), ExpiryLabel::Expired);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn any_category() -> impl Strategy<Value = Category> {
            proptest::sample::select(Category::ALL.to_vec())
        }

        proptest! {
            /// Property: categorize partitions its input.
            #[test]
            fn categorize_is_a_partition(cats in proptest::collection::vec(any_category(), 0..40)) {
                let items: Vec<_> = cats
                    .iter()
                    .enumerate()
                    .map(|(i, c)| item(&i.to_string(), *c, test_time()))
                    .collect();

                let groups = categorize(&items);

                let total: usize = groups.iter().map(|g| g.items.len()).sum();
                prop_assert_eq!(total, items.len());

                for group in &groups {
                    prop_assert!(group.items.iter().all(|i| i.category() == group.category));
                }

                let distinct: HashSet<_> = groups.iter().map(|g| g.category).collect();
                prop_assert_eq!(distinct.len(), groups.len());

                for it in &items {
                    let hits = groups
                        .iter()
                        .flat_map(|g| g.items.iter())
                        .filter(|x| x.id_typed() == it.id_typed())
                        .count();
                    prop_assert_eq!(hits, 1);
                }
            }

            /// Property: an empty term never filters anything out.
            #[test]
            fn empty_term_is_identity(names in proptest::collection::vec("[A-Za-z ]{0,12}", 0..20)) {
                let items: Vec<_> = names.iter().map(|n| item(n, Category::Other, test_time())).collect();
                prop_assert_eq!(search(&items, ""), items);
            }
        }
    }
}
