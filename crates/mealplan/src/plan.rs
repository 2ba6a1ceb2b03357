use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pantry_core::ValueObject;

use crate::recipe::Recipe;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

impl core::fmt::Display for Day {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealTime {
    pub const ALL: [MealTime; 3] = [MealTime::Breakfast, MealTime::Lunch, MealTime::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealTime::Breakfast => "breakfast",
            MealTime::Lunch => "lunch",
            MealTime::Dinner => "dinner",
        }
    }
}

impl core::fmt::Display for MealTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (day, meal time) coordinate in the weekly plan. Orders by day, then meal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: Day,
    pub meal_time: MealTime,
}

impl Slot {
    pub fn new(day: Day, meal_time: MealTime) -> Self {
        Self { day, meal_time }
    }
}

impl ValueObject for Slot {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub slot: Slot,
    pub recipe: Recipe,
}

/// The three slots of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Day,
    pub breakfast: Option<Recipe>,
    pub lunch: Option<Recipe>,
    pub dinner: Option<Recipe>,
}

/// Weekly plan: each slot is either empty or holds exactly one recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPlan {
    slots: BTreeMap<Slot, Recipe>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `recipe` into the slot, returning whatever it replaced.
    pub fn plan(&mut self, slot: Slot, recipe: Recipe) -> Option<Recipe> {
        self.slots.insert(slot, recipe)
    }

    /// Empty the slot. Clearing an empty slot is a no-op.
    pub fn clear(&mut self, slot: Slot) -> Option<Recipe> {
        self.slots.remove(&slot)
    }

    pub fn get(&self, slot: Slot) -> Option<&Recipe> {
        self.slots.get(&slot)
    }

    /// Planned meals ordered by day, then meal time.
    pub fn list_plan(&self) -> Vec<PlannedMeal> {
        self.slots
            .iter()
            .map(|(slot, recipe)| PlannedMeal {
                slot: *slot,
                recipe: recipe.clone(),
            })
            .collect()
    }

    pub fn day_plan(&self, day: Day) -> DayPlan {
        let at = |meal_time| self.get(Slot::new(day, meal_time)).cloned();
        DayPlan {
            day,
            breakfast: at(MealTime::Breakfast),
            lunch: at(MealTime::Lunch),
            dinner: at(MealTime::Dinner),
        }
    }

    /// All seven days, including empty ones.
    pub fn week(&self) -> Vec<DayPlan> {
        Day::ALL.into_iter().map(|day| self.day_plan(day)).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
