//! Change notifications for the kitchen engine.
//!
//! The presentation layer re-reads state when something changes; this crate
//! gives it a way to hear about changes without polling. Mechanics only, the
//! concrete event types live in the domain crates.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
