//! Meal Plan & Shopping List deriver.

use serde::Serialize;

use pantry_inventory::InventoryItem;

use crate::plan::{Day, DayPlan, MealPlan, MealTime, PlannedMeal, Slot};
use crate::recipe::Recipe;
use crate::shopping::{ShoppingList, missing_ingredients};

/// Owns the weekly plan and the shopping list.
///
/// Every operation is total: there is nothing here that can fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealPlanner {
    #[serde(serialize_with = "serialize_plan")]
    plan: MealPlan,
    shopping: ShoppingList,
}

fn serialize_plan<S: serde::Serializer>(plan: &MealPlan, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(plan.list_plan())
}

impl MealPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `recipe` to the slot (overwriting), then derive the shopping
    /// list from `inventory` as it is right now.
    ///
    /// Returns the ingredients newly added to the shopping list.
    pub fn plan_slot(
        &mut self,
        day: Day,
        meal_time: MealTime,
        recipe: Recipe,
        inventory: &[InventoryItem],
    ) -> Vec<String> {
        let slot = Slot::new(day, meal_time);
        let title = recipe.title.clone();
        let previous = self.plan.plan(slot, recipe.clone());
        tracing::info!(
            %day,
            %meal_time,
            recipe = title.as_str(),
            replaced = previous.as_ref().map(|r| r.title.as_str()),
            "slot planned"
        );
        self.derive_shopping_list(&recipe, inventory)
    }

    /// Empty the slot; no-op if already empty. The shopping list is left as is.
    pub fn clear_slot(&mut self, day: Day, meal_time: MealTime) -> Option<Recipe> {
        let cleared = self.plan.clear(Slot::new(day, meal_time));
        if let Some(recipe) = &cleared {
            tracing::info!(%day, %meal_time, recipe = recipe.title.as_str(), "slot cleared");
        }
        cleared
    }

    pub fn list_plan(&self) -> Vec<PlannedMeal> {
        self.plan.list_plan()
    }

    pub fn day_plan(&self, day: Day) -> DayPlan {
        self.plan.day_plan(day)
    }

    pub fn week(&self) -> Vec<DayPlan> {
        self.plan.week()
    }

    /// Union the recipe's missing ingredients into the shopping list.
    ///
    /// Uses `inventory` as a snapshot; later inventory changes don't
    /// retroactively clear entries.
    pub fn derive_shopping_list(
        &mut self,
        recipe: &Recipe,
        inventory: &[InventoryItem],
    ) -> Vec<String> {
        let missing = missing_ingredients(recipe, inventory);
        let added = self.shopping.merge(missing);
        if !added.is_empty() {
            tracing::info!(
                recipe = recipe.title.as_str(),
                added = ?added,
                "shopping list extended"
            );
        }
        added
    }

    /// Mark one entry as bought/handled. Inventory is not touched.
    pub fn resolve_shopping_list_entry(&mut self, ingredient: &str) -> bool {
        let removed = self.shopping.resolve(ingredient);
        if removed {
            tracing::info!(ingredient, "shopping list entry resolved");
        }
        removed
    }

    pub fn list_shopping_list(&self) -> Vec<String> {
        self.shopping.entries().to_vec()
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping
    }

    pub fn plan(&self) -> &MealPlan {
        &self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pantry_core::FixedClock;
    use pantry_inventory::{Category, ItemRepository, ItemStatus, NewItem, Quantity, Unit};
    use std::sync::Arc;

    fn repo_with(names: &[&str]) -> ItemRepository {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let repo = ItemRepository::new(Arc::new(FixedClock::new(now)));
        for name in names {
            repo.add_item(NewItem {
                name: name.to_string(),
                quantity: Quantity::whole(1),
                unit: Unit::Piece,
                category: Category::Other,
                expiry_date: now + Duration::days(3),
                added_date: now,
                status: ItemStatus::Medium,
                barcode: None,
            });
        }
        repo
    }

    fn toast() -> Recipe {
        Recipe::new("Avocado Toast", ["bread", "avocado", "eggs"])
    }

    #[test]
    fn planning_derives_missing_ingredients() {
        let repo = repo_with(&["bread"]);
        let mut planner = MealPlanner::new();

        let added =
            planner.plan_slot(Day::Monday, MealTime::Breakfast, toast(), &repo.list_items());

        assert_eq!(added, vec!["avocado", "eggs"]);
        assert_eq!(planner.list_shopping_list(), vec!["avocado", "eggs"]);
        assert_eq!(planner.list_plan().len(), 1);
    }

    #[test]
    fn derivation_is_a_snapshot() {
        let repo = repo_with(&["bread"]);
        let mut planner = MealPlanner::new();
        planner.plan_slot(Day::Monday, MealTime::Breakfast, toast(), &repo.list_items());

        // Buying avocados afterwards does not clear the entry.
        repo.add_item(NewItem {
            name: "Avocado".to_string(),
            quantity: Quantity::whole(2),
            unit: Unit::Piece,
            category: Category::Fruits,
            expiry_date: Utc::now(),
            added_date: Utc::now(),
            status: ItemStatus::Fresh,
            barcode: None,
        });

        assert!(planner.shopping_list().contains("avocado"));
    }

    #[test]
    fn planning_twice_does_not_duplicate_entries() {
        let repo = repo_with(&[]);
        let mut planner = MealPlanner::new();

        planner.plan_slot(Day::Monday, MealTime::Breakfast, toast(), &repo.list_items());
        let added =
            planner.plan_slot(Day::Tuesday, MealTime::Breakfast, toast(), &repo.list_items());

        assert!(added.is_empty());
        assert_eq!(planner.list_shopping_list(), vec!["bread", "avocado", "eggs"]);
        assert_eq!(planner.list_plan().len(), 2);
    }

    #[test]
    fn clearing_a_slot_keeps_shopping_list() {
        let repo = repo_with(&["bread"]);
        let mut planner = MealPlanner::new();
        planner.plan_slot(Day::Monday, MealTime::Lunch, toast(), &repo.list_items());

        assert!(planner.clear_slot(Day::Monday, MealTime::Lunch).is_some());
        assert!(planner.clear_slot(Day::Monday, MealTime::Lunch).is_none());

        assert!(planner.list_plan().is_empty());
        assert_eq!(planner.list_shopping_list(), vec!["avocado", "eggs"]);
    }

    #[test]
    fn resolving_leaves_other_entries() {
        let repo = repo_with(&["bread"]);
        let mut planner = MealPlanner::new();
        planner.plan_slot(Day::Monday, MealTime::Dinner, toast(), &repo.list_items());

        assert!(planner.resolve_shopping_list_entry("avocado"));
        assert_eq!(planner.list_shopping_list(), vec!["eggs"]);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn serializes_plan_as_list() {
        let mut planner = MealPlanner::new();
        planner.plan_slot(Day::Friday, MealTime::Dinner, toast(), &[]);

        let json = serde_json::to_value(&planner).unwrap();
        assert_eq!(json["plan"][0]["slot"]["day"], "friday");
        assert_eq!(json["shopping"][2], "eggs");
    }
}
