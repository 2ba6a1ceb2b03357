//! The household's dietary profile: diets, allergens, cuisines and health notes.
//!
//! Stored for display and planning by the user; nothing here filters recipes.

use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult};

/// How the user reports feeling today.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feeling {
    Great,
    #[default]
    Good,
    Neutral,
    Gastric,
    Nauseous,
}

impl Feeling {
    pub const ALL: [Feeling; 5] = [
        Feeling::Great,
        Feeling::Good,
        Feeling::Neutral,
        Feeling::Gastric,
        Feeling::Nauseous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feeling::Great => "great",
            Feeling::Good => "good",
            Feeling::Neutral => "neutral",
            Feeling::Gastric => "gastric",
            Feeling::Nauseous => "nauseous",
        }
    }
}

impl core::str::FromStr for Feeling {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Feeling::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown feeling: {s}")))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    Vegetarian,
    Vegan,
    Pescatarian,
    GlutenFree,
    DairyFree,
    Keto,
    Paleo,
    LowCarb,
}

impl DietType {
    pub const ALL: [DietType; 8] = [
        DietType::Vegetarian,
        DietType::Vegan,
        DietType::Pescatarian,
        DietType::GlutenFree,
        DietType::DairyFree,
        DietType::Keto,
        DietType::Paleo,
        DietType::LowCarb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::Pescatarian => "pescatarian",
            DietType::GlutenFree => "gluten-free",
            DietType::DairyFree => "dairy-free",
            DietType::Keto => "keto",
            DietType::Paleo => "paleo",
            DietType::LowCarb => "low-carb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DietType::Vegetarian => "Vegetarian",
            DietType::Vegan => "Vegan",
            DietType::Pescatarian => "Pescatarian",
            DietType::GlutenFree => "Gluten-free",
            DietType::DairyFree => "Dairy-free",
            DietType::Keto => "Keto",
            DietType::Paleo => "Paleo",
            DietType::LowCarb => "Low-carb",
        }
    }
}

impl core::str::FromStr for DietType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DietType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown diet: {s}")))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Allergen {
    Nuts,
    Shellfish,
    Eggs,
    Dairy,
    Gluten,
    Soy,
    Fish,
}

impl Allergen {
    pub const ALL: [Allergen; 7] = [
        Allergen::Nuts,
        Allergen::Shellfish,
        Allergen::Eggs,
        Allergen::Dairy,
        Allergen::Gluten,
        Allergen::Soy,
        Allergen::Fish,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Allergen::Nuts => "nuts",
            Allergen::Shellfish => "shellfish",
            Allergen::Eggs => "eggs",
            Allergen::Dairy => "dairy",
            Allergen::Gluten => "gluten",
            Allergen::Soy => "soy",
            Allergen::Fish => "fish",
        }
    }
}

impl core::str::FromStr for Allergen {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Allergen::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown allergen: {s}")))
    }
}

/// Cuisines offered as preferences.
pub const CUISINES: [&str; 13] = [
    "Italian",
    "French",
    "Japanese",
    "Chinese",
    "Indian",
    "Thai",
    "Mexican",
    "Spanish",
    "Greek",
    "Lebanese",
    "Turkish",
    "Korean",
    "Vietnamese",
];

/// Selections keep the order they were made in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryProfile {
    feeling: Feeling,
    diets: Vec<DietType>,
    allergens: Vec<Allergen>,
    cuisines: Vec<String>,
    health_conditions: Vec<String>,
}

/// Flip membership of `value`; returns whether it is now selected.
fn toggle<T: PartialEq>(selected: &mut Vec<T>, value: T) -> bool {
    match selected.iter().position(|v| *v == value) {
        Some(index) => {
            selected.remove(index);
            false
        }
        None => {
            selected.push(value);
            true
        }
    }
}

fn position_ignore_case(entries: &[String], name: &str) -> Option<usize> {
    let key = name.trim().to_lowercase();
    entries.iter().position(|e| e.to_lowercase() == key)
}

impl DietaryProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter profile: a nut allergy, one health note and three cuisines.
    pub fn demo() -> Self {
        Self {
            feeling: Feeling::Good,
            diets: Vec::new(),
            allergens: vec![Allergen::Nuts],
            cuisines: vec!["Italian".into(), "Japanese".into(), "Mexican".into()],
            health_conditions: vec!["High blood pressure".into()],
        }
    }

    pub fn feeling(&self) -> Feeling {
        self.feeling
    }

    pub fn diets(&self) -> &[DietType] {
        &self.diets
    }

    pub fn allergens(&self) -> &[Allergen] {
        &self.allergens
    }

    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    pub fn health_conditions(&self) -> &[String] {
        &self.health_conditions
    }

    pub fn has_diet(&self, diet: DietType) -> bool {
        self.diets.contains(&diet)
    }

    pub fn has_allergen(&self, allergen: Allergen) -> bool {
        self.allergens.contains(&allergen)
    }

    pub fn likes_cuisine(&self, cuisine: &str) -> bool {
        position_ignore_case(&self.cuisines, cuisine).is_some()
    }

    pub fn set_feeling(&mut self, feeling: Feeling) {
        self.feeling = feeling;
    }

    pub fn toggle_diet(&mut self, diet: DietType) -> bool {
        toggle(&mut self.diets, diet)
    }

    pub fn toggle_allergen(&mut self, allergen: Allergen) -> bool {
        toggle(&mut self.allergens, allergen)
    }

    /// Case-insensitive. Known cuisines are stored with their canonical
    /// spelling, anything else trimmed as given.
    pub fn toggle_cuisine(&mut self, cuisine: &str) -> DomainResult<bool> {
        let cuisine = cuisine.trim();
        if cuisine.is_empty() {
            return Err(DomainError::validation("cuisine cannot be blank"));
        }
        if let Some(index) = position_ignore_case(&self.cuisines, cuisine) {
            self.cuisines.remove(index);
            return Ok(false);
        }
        let canonical = CUISINES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(cuisine))
            .map_or_else(|| cuisine.to_string(), |c| c.to_string());
        self.cuisines.push(canonical);
        Ok(true)
    }

    /// Returns `false` if the condition was already listed.
    pub fn add_health_condition(&mut self, condition: &str) -> DomainResult<bool> {
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(DomainError::validation("health condition cannot be blank"));
        }
        if position_ignore_case(&self.health_conditions, condition).is_some() {
            return Ok(false);
        }
        self.health_conditions.push(condition.to_string());
        Ok(true)
    }

    pub fn remove_health_condition(&mut self, condition: &str) -> bool {
        match position_ignore_case(&self.health_conditions, condition) {
            Some(index) => {
                self.health_conditions.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_feels_good_and_is_empty() {
        let profile = DietaryProfile::new();
        assert_eq!(profile.feeling(), Feeling::Good);
        assert!(profile.diets().is_empty());
        assert!(profile.allergens().is_empty());
        assert!(profile.cuisines().is_empty());
        assert!(profile.health_conditions().is_empty());
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut profile = DietaryProfile::demo();

        assert!(profile.toggle_diet(DietType::Vegan));
        assert!(profile.has_diet(DietType::Vegan));
        assert!(!profile.toggle_diet(DietType::Vegan));
        assert!(!profile.has_diet(DietType::Vegan));

        assert!(!profile.toggle_allergen(Allergen::Nuts));
        assert!(profile.allergens().is_empty());
        assert!(profile.toggle_allergen(Allergen::Nuts));
    }

    #[test]
    fn selections_keep_their_order() {
        let mut profile = DietaryProfile::new();
        profile.toggle_allergen(Allergen::Soy);
        profile.toggle_allergen(Allergen::Eggs);
        profile.toggle_allergen(Allergen::Fish);
        profile.toggle_allergen(Allergen::Eggs);

        assert_eq!(profile.allergens(), [Allergen::Soy, Allergen::Fish]);
    }

    #[test]
    fn cuisines_toggle_case_insensitively() {
        let mut profile = DietaryProfile::demo();

        assert!(!profile.toggle_cuisine("italian").unwrap());
        assert!(!profile.likes_cuisine("Italian"));

        assert!(profile.toggle_cuisine(" thai ").unwrap());
        assert_eq!(profile.cuisines(), ["Japanese", "Mexican", "Thai"]);

        assert!(profile.toggle_cuisine("Ethiopian").unwrap());
        assert!(profile.likes_cuisine("ETHIOPIAN"));

        assert!(profile.toggle_cuisine("  ").is_err());
    }

    #[test]
    fn health_conditions_add_and_remove() {
        let mut profile = DietaryProfile::demo();

        assert!(profile.add_health_condition("Diabetes").unwrap());
        assert!(!profile.add_health_condition("diabetes ").unwrap());
        assert!(profile.add_health_condition("").is_err());

        assert!(profile.remove_health_condition("high blood pressure"));
        assert!(!profile.remove_health_condition("high blood pressure"));
        assert_eq!(profile.health_conditions(), ["Diabetes"]);
    }

    #[test]
    fn codes_parse_and_serialize() {
        assert_eq!("gluten-free".parse::<DietType>().unwrap(), DietType::GlutenFree);
        assert_eq!(DietType::LowCarb.label(), "Low-carb");
        assert_eq!("SHELLFISH".parse::<Allergen>().unwrap(), Allergen::Shellfish);
        assert_eq!("gastric".parse::<Feeling>().unwrap(), Feeling::Gastric);
        assert!("sleepy".parse::<Feeling>().is_err());

        assert_eq!(
            serde_json::to_string(&DietType::DairyFree).unwrap(),
            "\"dairy-free\""
        );
        for diet in DietType::ALL {
            assert_eq!(
                serde_json::to_value(diet).unwrap(),
                serde_json::json!(diet.as_str())
            );
        }
    }

    #[test]
    fn feeling_is_replaced() {
        let mut profile = DietaryProfile::new();
        profile.set_feeling(Feeling::Nauseous);
        assert_eq!(profile.feeling(), Feeling::Nauseous);
    }
}
