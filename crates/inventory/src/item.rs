use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, Entity, ItemId, ValueObject};

/// Measurement unit for an item's quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "pcs")]
    Piece,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "lbs")]
    Pound,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "gallon")]
    Gallon,
    #[serde(rename = "bottle")]
    Bottle,
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "can")]
    Can,
    #[serde(rename = "pack")]
    Pack,
}

impl Unit {
    pub const ALL: [Unit; 15] = [
        Unit::Piece,
        Unit::Kilogram,
        Unit::Gram,
        Unit::Pound,
        Unit::Ounce,
        Unit::Liter,
        Unit::Milliliter,
        Unit::Cup,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::Gallon,
        Unit::Bottle,
        Unit::Box,
        Unit::Can,
        Unit::Pack,
    ];

    /// Short code shown next to the quantity ("pcs", "kg", ...).
    pub fn code(self) -> &'static str {
        match self {
            Unit::Piece => "pcs",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Pound => "lbs",
            Unit::Ounce => "oz",
            Unit::Liter => "l",
            Unit::Milliliter => "ml",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Gallon => "gallon",
            Unit::Bottle => "bottle",
            Unit::Box => "box",
            Unit::Can => "can",
            Unit::Pack => "pack",
        }
    }

    /// Human label used in pickers.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Piece => "Pieces",
            Unit::Kilogram => "Kilograms",
            Unit::Gram => "Grams",
            Unit::Pound => "Pounds",
            Unit::Ounce => "Ounces",
            Unit::Liter => "Liters",
            Unit::Milliliter => "Milliliters",
            Unit::Cup => "Cups",
            Unit::Tablespoon => "Tablespoons",
            Unit::Teaspoon => "Teaspoons",
            Unit::Gallon => "Gallons",
            Unit::Bottle => "Bottles",
            Unit::Box => "Boxes",
            Unit::Can => "Cans",
            Unit::Pack => "Packs",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.code())
    }
}

impl core::str::FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Unit::ALL
            .into_iter()
            .find(|u| u.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown unit: {s}")))
    }
}

/// Shelf category an item is grouped under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Dairy,
    Meat,
    Fruits,
    Vegetables,
    Bakery,
    Grains,
    Canned,
    Frozen,
    Beverages,
    Condiments,
    Snacks,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Dairy,
        Category::Meat,
        Category::Fruits,
        Category::Vegetables,
        Category::Bakery,
        Category::Grains,
        Category::Canned,
        Category::Frozen,
        Category::Beverages,
        Category::Condiments,
        Category::Snacks,
        Category::Other,
    ];

    /// Stable name, also what search matches against.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Bakery => "Bakery",
            Category::Grains => "Grains",
            Category::Canned => "Canned",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::Condiments => "Condiments",
            Category::Snacks => "Snacks",
            Category::Other => "Other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Grains => "Grains & Pasta",
            Category::Canned => "Canned Goods",
            Category::Frozen => "Frozen Foods",
            other => other.as_str(),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown category: {s}")))
    }
}

/// User/source-set stock label.
///
/// Not derived from the expiry date: an item can be `Fresh` and expire
/// tomorrow, and nothing reconciles the two.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Low,
    Medium,
    High,
    Empty,
    Expired,
    Fresh,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 6] = [
        ItemStatus::Low,
        ItemStatus::Medium,
        ItemStatus::High,
        ItemStatus::Empty,
        ItemStatus::Expired,
        ItemStatus::Fresh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Low => "low",
            ItemStatus::Medium => "medium",
            ItemStatus::High => "high",
            ItemStatus::Empty => "empty",
            ItemStatus::Expired => "expired",
            ItemStatus::Fresh => "fresh",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ItemStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown status: {s}")))
    }
}

/// Non-negative, finite amount of an item.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("quantity must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        Ok(Self(value))
    }

    /// Whole-unit quantity; always valid.
    pub fn whole(value: u32) -> Self {
        Self(f64::from(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for Quantity {}

impl TryFrom<f64> for Quantity {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Everything an item carries except its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: Quantity,
    pub unit: Unit,
    pub category: Category,
    pub expiry_date: DateTime<Utc>,
    pub added_date: DateTime<Utc>,
    pub status: ItemStatus,
    pub barcode: Option<String>,
}

/// A tracked inventory item.
///
/// `id` and `added_date` are fixed at creation. Every other field is replaced
/// only through [`ItemPatch`] via the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    quantity: Quantity,
    unit: Unit,
    category: Category,
    expiry_date: DateTime<Utc>,
    added_date: DateTime<Utc>,
    status: ItemStatus,
    barcode: Option<String>,
}

impl InventoryItem {
    pub(crate) fn create(id: ItemId, fields: NewItem) -> Self {
        Self {
            id,
            name: fields.name,
            quantity: fields.quantity,
            unit: fields.unit,
            category: fields.category,
            expiry_date: fields.expiry_date,
            added_date: fields.added_date,
            status: fields.status,
            barcode: fields.barcode,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn expiry_date(&self) -> DateTime<Utc> {
        self.expiry_date
    }

    pub fn added_date(&self) -> DateTime<Utc> {
        self.added_date
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    /// Replace exactly the fields present in `patch`.
    pub(crate) fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(expiry_date) = patch.expiry_date {
            self.expiry_date = expiry_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(barcode) = &patch.barcode {
            self.barcode = barcode.clone();
        }
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Partial update. `None` leaves the field untouched.
///
/// `barcode: Some(None)` clears the barcode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<Quantity>,
    pub unit: Option<Unit>,
    pub category: Option<Category>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: Option<ItemStatus>,
    pub barcode: Option<Option<String>>,
}

impl ItemPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn expiry_date(mut self, expiry_date: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn barcode(mut self, barcode: Option<String>) -> Self {
        self.barcode = Some(barcode);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }
}

/// Days an item is assumed to keep when the user doesn't pick an expiry.
pub const DEFAULT_SHELF_LIFE_DAYS: i64 = 7;

/// Add-item form state with the form's defaults pre-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: Quantity,
    pub unit: Unit,
    pub category: Category,
    pub expiry_date: DateTime<Utc>,
    pub status: ItemStatus,
    pub barcode: Option<String>,
}

impl ItemDraft {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            quantity: Quantity::whole(1),
            unit: Unit::Piece,
            category: Category::Other,
            expiry_date: now + Duration::days(DEFAULT_SHELF_LIFE_DAYS),
            status: ItemStatus::Medium,
            barcode: None,
        }
    }

    /// Turn the form into repository input, stamping `added_date = now`.
    pub fn finish(self, now: DateTime<Utc>) -> DomainResult<NewItem> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Please enter a name for the item"));
        }
        Ok(NewItem {
            name: name.to_string(),
            quantity: self.quantity,
            unit: self.unit,
            category: self.category,
            expiry_date: self.expiry_date,
            added_date: now,
            status: self.status,
            barcode: self.barcode.filter(|b| !b.trim().is_empty()),
        })
    }
}
