use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use pantry_core::{Clock, DishId, DomainResult, ItemId, SystemClock};
use pantry_events::Subscription;
use pantry_inventory::{
    BarcodeCatalog, BarcodeResolver, CategoryGroup, ExpiryLabel, InventoryEvent, InventoryItem,
    ItemDraft, ItemPatch, ItemRepository, NewItem, ScanError, demo, projection,
};
use pantry_mealplan::{
    Allergen, CookedDish, CookedLog, Day, DayPlan, DietType, DietaryProfile, Feeling,
    LastCookedLabel, MealPlanner, MealTime, PlannedMeal, Rating, Recipe, RecipeBook,
};

use crate::config::KitchenConfig;

/// Point-in-time view of all engine state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenSnapshot {
    pub items: Vec<InventoryItem>,
    pub plan: Vec<PlannedMeal>,
    pub shopping_list: Vec<String>,
    pub cooked: Vec<CookedDish>,
    pub dietary: DietaryProfile,
}

/// Explicit state container owned by the application root.
///
/// The presentation layer holds a handle (`Arc<Kitchen>` if it needs to share
/// it with spawned scans) and funnels every change through these methods.
#[derive(Debug)]
pub struct Kitchen {
    clock: Arc<dyn Clock>,
    inventory: Arc<ItemRepository>,
    resolver: BarcodeResolver,
    planner: Mutex<MealPlanner>,
    recipes: RecipeBook,
    cooked: Mutex<CookedLog>,
    dietary: Mutex<DietaryProfile>,
}

impl Kitchen {
    /// Empty kitchen with the given time source and barcode catalog.
    pub fn new(clock: Arc<dyn Clock>, catalog: Arc<dyn BarcodeCatalog>) -> Self {
        let inventory = Arc::new(ItemRepository::new(clock.clone()));
        let resolver = BarcodeResolver::new(catalog, inventory.clone(), clock.clone());
        Self {
            clock,
            inventory,
            resolver,
            planner: Mutex::new(MealPlanner::new()),
            recipes: RecipeBook::default(),
            cooked: Mutex::new(CookedLog::new()),
            dietary: Mutex::new(DietaryProfile::new()),
        }
    }

    /// Wall-clock kitchen backed by the demo catalog and recipe book.
    pub fn from_config(config: &KitchenConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let catalog = Arc::new(demo::demo_catalog(config.scan_latency()));
        let mut kitchen = Self::new(clock, catalog).with_recipes(RecipeBook::demo());

        if config.seed_demo_data {
            let now = kitchen.now();
            for item in demo::demo_items(now) {
                kitchen.add_item(item);
            }
            kitchen = kitchen
                .with_cooked_log(CookedLog::demo(now))
                .with_dietary_profile(DietaryProfile::demo());
        }

        tracing::info!(
            items = kitchen.inventory.len(),
            recipes = kitchen.recipes.len(),
            cooked = kitchen.cooked().len(),
            scan_latency_ms = config.scan_latency_ms,
            "kitchen ready"
        );
        kitchen
    }

    pub fn with_recipes(mut self, recipes: RecipeBook) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn with_cooked_log(self, log: CookedLog) -> Self {
        Self {
            cooked: Mutex::new(log),
            ..self
        }
    }

    pub fn with_dietary_profile(self, profile: DietaryProfile) -> Self {
        Self {
            dietary: Mutex::new(profile),
            ..self
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Change notifications for inventory mutations.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.inventory.subscribe()
    }

    // --- queries ---

    pub fn list_items(&self) -> Vec<InventoryItem> {
        self.inventory.list_items()
    }

    pub fn get_item(&self, id: ItemId) -> Option<InventoryItem> {
        self.inventory.get(id)
    }

    pub fn search(&self, term: &str) -> Vec<InventoryItem> {
        projection::search(&self.inventory.list_items(), term)
    }

    pub fn categorize(&self, items: &[InventoryItem]) -> Vec<CategoryGroup> {
        projection::categorize(items)
    }

    pub fn days_until_expiry(&self, item: &InventoryItem, now: DateTime<Utc>) -> i64 {
        projection::days_until_expiry(item, now)
    }

    /// Freshness badge relative to the kitchen clock.
    pub fn expiry_label(&self, item: &InventoryItem) -> ExpiryLabel {
        ExpiryLabel::for_item(item, self.now())
    }

    // --- inventory commands ---

    pub fn add_item(&self, fields: NewItem) -> InventoryItem {
        self.inventory.add_item(fields)
    }

    /// A blank add-item form with today's defaults.
    pub fn new_draft(&self) -> ItemDraft {
        ItemDraft::new(self.now())
    }

    /// Validate a filled-in form and add it.
    pub fn add_draft(&self, draft: ItemDraft) -> DomainResult<InventoryItem> {
        let fields = draft.finish(self.now())?;
        Ok(self.inventory.add_item(fields))
    }

    pub fn update_item(&self, id: ItemId, patch: ItemPatch) -> Option<InventoryItem> {
        self.inventory.update_item(id, patch)
    }

    pub fn remove_item(&self, id: ItemId) -> Option<InventoryItem> {
        self.inventory.remove_item(id)
    }

    pub async fn scan(&self, barcode: &str) -> Result<InventoryItem, ScanError> {
        self.resolver.scan(barcode).await
    }

    pub fn is_scanning(&self) -> bool {
        self.resolver.is_loading()
    }

    pub fn last_scan_error(&self) -> Option<ScanError> {
        self.resolver.last_error()
    }

    // --- meal planning ---

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Plan the slot and extend the shopping list from the inventory as it
    /// is at this instant. Returns the newly listed ingredients.
    pub fn plan_slot(&self, day: Day, meal_time: MealTime, recipe: Recipe) -> Vec<String> {
        let snapshot = self.inventory.list_items();
        self.planner().plan_slot(day, meal_time, recipe, &snapshot)
    }

    pub fn clear_slot(&self, day: Day, meal_time: MealTime) -> Option<Recipe> {
        self.planner().clear_slot(day, meal_time)
    }

    pub fn list_plan(&self) -> Vec<PlannedMeal> {
        self.planner().list_plan()
    }

    pub fn week(&self) -> Vec<DayPlan> {
        self.planner().week()
    }

    // --- shopping list ---

    pub fn derive_shopping_list(&self, recipe: &Recipe) -> Vec<String> {
        let snapshot = self.inventory.list_items();
        self.planner().derive_shopping_list(recipe, &snapshot)
    }

    pub fn resolve_shopping_list_entry(&self, ingredient: &str) -> bool {
        self.planner().resolve_shopping_list_entry(ingredient)
    }

    pub fn list_shopping_list(&self) -> Vec<String> {
        self.planner().list_shopping_list()
    }

    pub fn export_shopping_list(&self) -> String {
        self.planner().shopping_list().export_text()
    }

    // --- cooked history ---

    pub fn cooked_dishes(&self) -> Vec<CookedDish> {
        self.cooked().entries().to_vec()
    }

    /// Dishes whose name or any tag contains `term`, ignoring case.
    pub fn search_cooked(&self, term: &str) -> Vec<CookedDish> {
        self.cooked().search(term)
    }

    /// Log that `name` was cooked now.
    pub fn record_cooked(&self, name: &str) -> DomainResult<CookedDish> {
        let dish = self.cooked().record(name, self.now())?;
        tracing::info!(
            dish_id = %dish.id,
            name = dish.name.as_str(),
            times_cooked = dish.times_cooked,
            "dish cooked"
        );
        Ok(dish)
    }

    pub fn rate_cooked(&self, id: DishId, rating: Rating) -> Option<CookedDish> {
        self.cooked().rate(id, rating)
    }

    pub fn remove_cooked(&self, id: DishId) -> Option<CookedDish> {
        self.cooked().remove(id)
    }

    /// "Last cooked" text relative to the kitchen clock.
    pub fn last_cooked_label(&self, dish: &CookedDish) -> LastCookedLabel {
        LastCookedLabel::for_dish(dish, self.now())
    }

    // --- dietary profile ---

    pub fn dietary_profile(&self) -> DietaryProfile {
        self.dietary().clone()
    }

    pub fn set_feeling(&self, feeling: Feeling) {
        self.dietary().set_feeling(feeling);
        tracing::debug!(feeling = feeling.as_str(), "feeling updated");
    }

    pub fn toggle_diet(&self, diet: DietType) -> bool {
        let selected = self.dietary().toggle_diet(diet);
        tracing::debug!(diet = diet.as_str(), selected, "diet toggled");
        selected
    }

    pub fn toggle_allergen(&self, allergen: Allergen) -> bool {
        let selected = self.dietary().toggle_allergen(allergen);
        tracing::debug!(allergen = allergen.as_str(), selected, "allergen toggled");
        selected
    }

    pub fn toggle_cuisine(&self, cuisine: &str) -> DomainResult<bool> {
        self.dietary().toggle_cuisine(cuisine)
    }

    pub fn add_health_condition(&self, condition: &str) -> DomainResult<bool> {
        self.dietary().add_health_condition(condition)
    }

    pub fn remove_health_condition(&self, condition: &str) -> bool {
        self.dietary().remove_health_condition(condition)
    }

    pub fn snapshot(&self) -> KitchenSnapshot {
        let items = self.inventory.list_items();
        let (plan, shopping_list) = {
            let planner = self.planner();
            (planner.list_plan(), planner.list_shopping_list())
        };
        KitchenSnapshot {
            items,
            plan,
            shopping_list,
            cooked: self.cooked_dishes(),
            dietary: self.dietary_profile(),
        }
    }

    fn planner(&self) -> MutexGuard<'_, MealPlanner> {
        self.planner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cooked(&self) -> MutexGuard<'_, CookedLog> {
        self.cooked.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dietary(&self) -> MutexGuard<'_, DietaryProfile> {
        self.dietary.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
