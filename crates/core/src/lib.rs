//! `pantry-core` — shared building blocks for the kitchen domain.
//!
//! Pure domain primitives only: identifiers, errors, time and the
//! entity/value-object markers. No IO, no async.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DishId, ItemId, RecipeId};
pub use value_object::ValueObject;
