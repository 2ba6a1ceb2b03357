//! History of dishes the household has cooked.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{DishId, DomainError, DomainResult, Entity, ValueObject};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Star rating between 0 and 5; half stars are allowed.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MAX: f64 = 5.0;
    pub const UNRATED: Rating = Rating(0.0);

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || !(0.0..=Self::MAX).contains(&value) {
            return Err(DomainError::validation("rating must be between 0 and 5"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for Rating {}

impl TryFrom<f64> for Rating {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl core::fmt::Display for Rating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// A dish in the cooked history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookedDish {
    pub id: DishId,
    pub name: String,
    pub last_cooked: DateTime<Utc>,
    pub times_cooked: u32,
    pub rating: Rating,
    pub tags: Vec<String>,
}

impl CookedDish {
    /// A dish cooked once, at `cooked_at`, not yet rated.
    pub fn new(name: impl Into<String>, cooked_at: DateTime<Utc>) -> Self {
        Self {
            id: DishId::new(),
            name: name.into(),
            last_cooked: cooked_at,
            times_cooked: 1,
            rating: Rating::UNRATED,
            tags: Vec::new(),
        }
    }

    pub fn with_times_cooked(mut self, times: u32) -> Self {
        self.times_cooked = times;
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Name or any tag contains `term` (case-insensitive).
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

impl Entity for CookedDish {
    type Id = DishId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Whole days elapsed since `last_cooked`, rounded down.
pub fn days_since(last_cooked: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = now - last_cooked;
    let seconds = delta.num_seconds();
    let days = seconds / SECONDS_PER_DAY;
    let remainder = seconds % SECONDS_PER_DAY;
    if remainder < 0 || (remainder == 0 && delta.subsec_nanos() < 0) {
        days - 1
    } else {
        days
    }
}

/// "Last cooked" text. A week or more back shows the calendar date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LastCookedLabel {
    Today,
    Yesterday,
    DaysAgo(i64),
    On(NaiveDate),
}

impl LastCookedLabel {
    /// Timestamps in the future count as today.
    pub fn new(last_cooked: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match days_since(last_cooked, now) {
            d if d <= 0 => LastCookedLabel::Today,
            1 => LastCookedLabel::Yesterday,
            d if d < 7 => LastCookedLabel::DaysAgo(d),
            _ => LastCookedLabel::On(last_cooked.date_naive()),
        }
    }

    pub fn for_dish(dish: &CookedDish, now: DateTime<Utc>) -> Self {
        Self::new(dish.last_cooked, now)
    }
}

impl core::fmt::Display for LastCookedLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LastCookedLabel::Today => f.write_str("Today"),
            LastCookedLabel::Yesterday => f.write_str("Yesterday"),
            LastCookedLabel::DaysAgo(days) => write!(f, "{days} days ago"),
            LastCookedLabel::On(date) => write!(f, "{}", date.format("%b %-d")),
        }
    }
}

/// Cooked dishes in the order they were first recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookedLog {
    dishes: Vec<CookedDish>,
}

impl CookedLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Four sample dishes cooked over the last ten days.
    pub fn demo(now: DateTime<Utc>) -> Self {
        let rating = |value| Rating::new(value).unwrap_or(Rating::UNRATED);
        Self {
            dishes: vec![
                CookedDish::new("Spaghetti Bolognese", now - Duration::days(2))
                    .with_times_cooked(8)
                    .with_rating(rating(4.5))
                    .with_tags(["Italian", "Pasta", "Family Favorite"]),
                CookedDish::new("Chicken Curry", now - Duration::days(5))
                    .with_times_cooked(5)
                    .with_rating(rating(5.0))
                    .with_tags(["Indian", "Spicy", "Dinner"]),
                CookedDish::new("Greek Salad", now - Duration::days(1))
                    .with_times_cooked(12)
                    .with_rating(rating(4.0))
                    .with_tags(["Greek", "Salad", "Healthy", "Quick"]),
                CookedDish::new("Chocolate Chip Cookies", now - Duration::days(10))
                    .with_times_cooked(3)
                    .with_rating(rating(5.0))
                    .with_tags(["Dessert", "Baking", "Sweet"]),
            ],
        }
    }

    pub fn entries(&self) -> &[CookedDish] {
        &self.dishes
    }

    pub fn get(&self, id: DishId) -> Option<&CookedDish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Dishes whose name or a tag contains `term`. Empty term lists all.
    pub fn search(&self, term: &str) -> Vec<CookedDish> {
        self.dishes.iter().filter(|d| d.matches(term)).cloned().collect()
    }

    /// Note that `name` was cooked at `cooked_at`.
    ///
    /// A dish already in the history (same trimmed name, ignoring case) gets
    /// its count bumped and its date moved; otherwise a new entry is added.
    pub fn record(&mut self, name: &str, cooked_at: DateTime<Utc>) -> DomainResult<CookedDish> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Please enter a name for the dish"));
        }

        let key = name.to_lowercase();
        if let Some(dish) = self.dishes.iter_mut().find(|d| d.name.to_lowercase() == key) {
            dish.times_cooked = dish.times_cooked.saturating_add(1);
            dish.last_cooked = dish.last_cooked.max(cooked_at);
            return Ok(dish.clone());
        }

        let dish = CookedDish::new(name, cooked_at);
        self.dishes.push(dish.clone());
        Ok(dish)
    }

    /// Unknown id is a no-op.
    pub fn rate(&mut self, id: DishId, rating: Rating) -> Option<CookedDish> {
        let dish = self.dishes.iter_mut().find(|d| d.id == id)?;
        dish.rating = rating;
        Some(dish.clone())
    }

    pub fn remove(&mut self, id: DishId) -> Option<CookedDish> {
        let index = self.dishes.iter().position(|d| d.id == id)?;
        Some(self.dishes.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(4.5).is_ok());
        assert!(Rating::new(5.0).is_ok());
        assert!(Rating::new(5.5).is_err());
        assert!(Rating::new(-1.0).is_err());
        assert!(Rating::new(f64::NAN).is_err());
        assert_eq!(Rating::new(4.0).unwrap().to_string(), "4.0");
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }

    #[test]
    fn search_matches_name_or_tag() {
        let log = CookedLog::demo(test_time());

        let by_name: Vec<_> = log.search("curry").into_iter().map(|d| d.name).collect();
        assert_eq!(by_name, vec!["Chicken Curry"]);

        let by_tag: Vec<_> = log.search("HEALTHY").into_iter().map(|d| d.name).collect();
        assert_eq!(by_tag, vec!["Greek Salad"]);

        assert_eq!(log.search("").len(), 4);
        assert!(log.search("sushi").is_empty());
    }

    #[test]
    fn labels_for_recent_and_old_dishes() {
        let now = test_time();
        let cases = [
            (now, "Today"),
            (now - Duration::hours(23), "Today"),
            (now - Duration::days(1), "Yesterday"),
            (now - Duration::hours(47), "Yesterday"),
            (now - Duration::days(2), "2 days ago"),
            (now - Duration::days(6), "6 days ago"),
            (now - Duration::days(7), "May 3"),
            (now - Duration::days(40), "Mar 31"),
        ];
        for (cooked_at, expected) in cases {
            assert_eq!(LastCookedLabel::new(cooked_at, now).to_string(), expected);
        }
    }

    #[test]
    fn future_dates_read_as_today() {
        let now = test_time();
        assert_eq!(
            LastCookedLabel::new(now + Duration::days(3), now),
            LastCookedLabel::Today
        );
    }

    #[test]
    fn days_since_rounds_down() {
        let now = test_time();
        assert_eq!(days_since(now - Duration::hours(36), now), 1);
        assert_eq!(days_since(now + Duration::hours(1), now), -1);
        assert_eq!(days_since(now + Duration::nanoseconds(1), now), -1);
        assert_eq!(days_since(now, now), 0);
    }

    #[test]
    fn recording_existing_dish_bumps_count() {
        let now = test_time();
        let mut log = CookedLog::demo(now - Duration::days(1));

        let dish = log.record("  greek salad ", now).unwrap();

        assert_eq!(dish.name, "Greek Salad");
        assert_eq!(dish.times_cooked, 13);
        assert_eq!(dish.last_cooked, now);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn recording_new_dish_appends() {
        let now = test_time();
        let mut log = CookedLog::new();

        let dish = log.record("Pancakes", now).unwrap();

        assert_eq!(dish.times_cooked, 1);
        assert_eq!(dish.rating, Rating::UNRATED);
        assert_eq!(log.entries(), [dish]);
    }

    #[test]
    fn recording_blank_name_fails() {
        let mut log = CookedLog::new();
        let err = log.record("   ", test_time()).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Please enter a name for the dish")
        );
        assert!(log.is_empty());
    }

    #[test]
    fn older_record_keeps_latest_date() {
        let now = test_time();
        let mut log = CookedLog::new();
        log.record("Soup", now).unwrap();

        let dish = log.record("soup", now - Duration::days(3)).unwrap();

        assert_eq!(dish.last_cooked, now);
        assert_eq!(dish.times_cooked, 2);
    }

    #[test]
    fn rate_and_remove_by_id() {
        let mut log = CookedLog::demo(test_time());
        let id = log.entries()[0].id;

        let rated = log.rate(id, Rating::new(3.5).unwrap()).unwrap();
        assert_eq!(rated.rating.value(), 3.5);
        assert_eq!(log.get(id), Some(&rated));

        assert_eq!(log.rate(DishId::new(), Rating::UNRATED), None);
        assert_eq!(log.remove(id).map(|d| d.name), Some("Spaghetti Bolognese".to_string()));
        assert_eq!(log.remove(id), None);
        assert_eq!(log.len(), 3);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: days_since recovers the whole-day offset, ignoring the part-day.
            #[test]
            fn days_since_is_floor(days in 0i64..400, extra in 0i64..SECONDS_PER_DAY) {
                let now = test_time();
                let cooked_at = now - Duration::days(days) - Duration::seconds(extra);
                prop_assert_eq!(days_since(cooked_at, now), days);
            }

            /// Property: the label matches the day buckets.
            #[test]
            fn label_buckets(days in 0i64..60) {
                let now = test_time();
                let cooked_at = now - Duration::days(days);
                let label = LastCookedLabel::new(cooked_at, now);
                let expected = match days {
                    0 => LastCookedLabel::Today,
                    1 => LastCookedLabel::Yesterday,
                    d if d < 7 => LastCookedLabel::DaysAgo(d),
                    _ => LastCookedLabel::On(cooked_at.date_naive()),
                };
                prop_assert_eq!(label, expected);
            }

            /// Property: search returns exactly the matching dishes, in log order.
            #[test]
            fn search_is_a_filter(
                names in proptest::collection::vec("[a-dA-D]{1,5}", 0..10),
                term in "[a-dA-D]{0,2}",
            ) {
                let now = test_time();
                let mut log = CookedLog::new();
                for name in &names {
                    log.record(name, now).unwrap();
                }

                let found = log.search(&term);
                let expected: Vec<_> = log
                    .entries()
                    .iter()
                    .filter(|d| d.matches(&term))
                    .cloned()
                    .collect();
                prop_assert_eq!(found, expected);
            }
        }
    }
}
