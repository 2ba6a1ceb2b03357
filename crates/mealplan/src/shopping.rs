use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use pantry_inventory::InventoryItem;

use crate::recipe::Recipe;

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Ingredients of `recipe` with no inventory item of the same name.
///
/// Names compare case-insensitively after trimming and are returned trimmed.
/// The result keeps recipe order and lists each missing ingredient once.
pub fn missing_ingredients(recipe: &Recipe, inventory: &[InventoryItem]) -> Vec<String> {
    let on_hand: HashSet<String> = inventory.iter().map(|item| normalize(item.name())).collect();
    let mut seen = HashSet::new();

    recipe
        .ingredients
        .iter()
        .map(|ingredient| ingredient.trim())
        .filter(|ingredient| {
            let key = normalize(ingredient);
            !key.is_empty() && !on_hand.contains(&key) && seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}

/// De-duplicated list of ingredient names to buy. Presence only, no amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    entries: Vec<String>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `names` into the list. Returns the names that were not already on it.
    ///
    /// Names are stored trimmed. An entry already present under a different
    /// case keeps its first spelling.
    pub fn merge<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if name.is_empty() || self.contains(&name) {
                continue;
            }
            added.push(name.clone());
            self.entries.push(name);
        }
        added
    }

    /// Drop one entry (case-insensitive). Returns `false` if it wasn't listed.
    pub fn resolve(&mut self, name: &str) -> bool {
        let key = normalize(name);
        let before = self.entries.len();
        self.entries.retain(|entry| normalize(entry) != key);
        self.entries.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = normalize(name);
        self.entries.iter().any(|entry| normalize(entry) == key)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One entry per line, ready for the clipboard.
    pub fn export_text(&self) -> String {
        self.entries.join("\n")
    }
}
