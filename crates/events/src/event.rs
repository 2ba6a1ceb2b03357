use chrono::{DateTime, Utc};

/// A fact about something that already happened to engine state.
///
/// Events are immutable and cheap to clone; every subscriber gets its own copy.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "inventory.item.added").
    fn event_type(&self) -> &'static str;

    /// When the change happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}
