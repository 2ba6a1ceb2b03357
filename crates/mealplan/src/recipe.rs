use serde::{Deserialize, Serialize};

use pantry_core::{Entity, RecipeId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A recipe / menu item that can be put into a meal slot.
///
/// Ingredients are plain names, matched against inventory item names
/// case-insensitively; they are not linked to inventory ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub ingredients: Vec<String>,
    pub description: String,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
}

impl Recipe {
    pub fn new<I, S>(title: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: RecipeId::new(),
            title: title.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            description: String::new(),
            cook_time_minutes: None,
            servings: None,
            difficulty: None,
            cuisine: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cook_time(mut self, minutes: u32) -> Self {
        self.cook_time_minutes = Some(minutes);
        self
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Title or any ingredient contains `term` (case-insensitive).
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }
}

impl Entity for Recipe {
    type Id = RecipeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Fixed catalog of recipes offered for planning. Canned data, no
/// recommendation logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn demo() -> Self {
        Self::new(vec![
            Recipe::new(
                "Greek Yogurt with Berries",
                ["greek yogurt", "berries", "honey", "granola"],
            )
            .with_description(
                "A quick and healthy breakfast with protein-rich yogurt and fresh berries.",
            )
            .with_cook_time(5)
            .with_servings(1)
            .with_difficulty(Difficulty::Easy)
            .with_cuisine("American"),
            Recipe::new(
                "Chicken Caesar Salad",
                [
                    "chicken breast",
                    "romaine lettuce",
                    "parmesan cheese",
                    "croutons",
                    "caesar dressing",
                ],
            )
            .with_description(
                "A classic Caesar salad with grilled chicken, romaine lettuce, and parmesan cheese.",
            )
            .with_cook_time(20)
            .with_servings(2)
            .with_difficulty(Difficulty::Easy)
            .with_cuisine("Italian"),
            Recipe::new(
                "Beef Stir Fry",
                ["beef", "bell peppers", "broccoli", "carrots", "soy sauce", "ginger", "garlic"],
            )
            .with_description(
                "A quick and flavorful beef stir fry with vegetables and a savory sauce.",
            )
            .with_cook_time(25)
            .with_servings(4)
            .with_difficulty(Difficulty::Medium)
            .with_cuisine("Asian"),
            Recipe::new("Avocado Toast", ["bread", "avocado", "eggs", "salt", "pepper"])
                .with_description("Simple and delicious avocado toast.")
                .with_cook_time(10)
                .with_servings(1)
                .with_difficulty(Difficulty::Easy)
                .with_cuisine("American"),
            Recipe::new(
                "Quinoa Bowl",
                ["quinoa", "sweet potato", "chickpeas", "kale", "tahini", "lemon juice"],
            )
            .with_description(
                "A nutritious quinoa bowl with roasted vegetables and tahini dressing.",
            )
            .with_cook_time(30)
            .with_servings(2)
            .with_difficulty(Difficulty::Medium)
            .with_cuisine("Mediterranean"),
            Recipe::new(
                "Pasta Primavera",
                ["pasta", "asparagus", "peas", "cherry tomatoes", "parmesan cheese", "lemon"],
            )
            .with_description("A light pasta dish with spring vegetables and a touch of lemon.")
            .with_cook_time(25)
            .with_servings(4)
            .with_difficulty(Difficulty::Easy)
            .with_cuisine("Italian"),
            Recipe::new(
                "Chicken Curry",
                ["chicken", "curry paste", "coconut milk", "rice", "onions"],
            ),
            Recipe::new(
                "Pasta Carbonara",
                ["pasta", "eggs", "cheese", "bacon", "black pepper"],
            ),
            Recipe::new(
                "Vegetable Stir Fry",
                ["tofu", "broccoli", "carrots", "soy sauce", "rice"],
            ),
        ])
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// First recipe whose title equals `title`, ignoring case.
    pub fn find_by_title(&self, title: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.title.eq_ignore_ascii_case(title.trim()))
    }

    /// Recipes whose title or ingredients contain `term`; empty term lists all.
    pub fn search(&self, term: &str) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| r.matches(term)).collect()
    }

    pub fn insert(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
