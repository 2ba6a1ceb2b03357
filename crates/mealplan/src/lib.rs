//! Weekly meal planning and the shopping list derived from it.
//!
//! Planning a meal checks the recipe's ingredients against an inventory
//! snapshot taken at that moment; anything missing goes onto the shopping
//! list. Later inventory changes do not revisit the list.
//!
//! The crate also keeps the cooked-dish history and the household's
//! dietary profile.

pub mod cooked;
pub mod dietary;
pub mod plan;
pub mod planner;
pub mod recipe;
pub mod shopping;

pub use cooked::{CookedDish, CookedLog, LastCookedLabel, Rating, days_since};
pub use dietary::{Allergen, CUISINES, DietType, DietaryProfile, Feeling};
pub use plan::{Day, DayPlan, MealPlan, MealTime, PlannedMeal, Slot};
pub use planner::MealPlanner;
pub use recipe::{Difficulty, Recipe, RecipeBook};
pub use shopping::{ShoppingList, missing_ingredients};
