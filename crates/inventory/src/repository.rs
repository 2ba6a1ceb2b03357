//! The authoritative in-memory collection of inventory items.

use std::sync::{Arc, PoisonError, RwLock};

use pantry_core::{Clock, ItemId};
use pantry_events::{EventBus, InMemoryEventBus, Subscription};

use crate::events::{InventoryEvent, ItemAdded, ItemRemoved, ItemSource, ItemUpdated};
use crate::item::{InventoryItem, ItemPatch, NewItem};

/// Item Repository.
///
/// Single writer for every `InventoryItem`. Methods take `&self` so the
/// repository can be shared (`Arc`) between the application root and the
/// barcode resolver; each call is atomic on its own, there is no batching.
///
/// Unknown ids are never an error: `update_item` and `remove_item` return
/// `None` and change nothing.
#[derive(Debug)]
pub struct ItemRepository {
    items: RwLock<Vec<InventoryItem>>,
    clock: Arc<dyn Clock>,
    events: Arc<InMemoryEventBus<InventoryEvent>>,
}

impl ItemRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_bus(clock, Arc::new(InMemoryEventBus::new()))
    }

    pub fn with_bus(clock: Arc<dyn Clock>, events: Arc<InMemoryEventBus<InventoryEvent>>) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            clock,
            events,
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.events.subscribe()
    }

    /// Store a new item under a freshly generated id. Always succeeds.
    pub fn add_item(&self, fields: NewItem) -> InventoryItem {
        self.insert(fields, ItemSource::Manual)
    }

    pub(crate) fn insert(&self, fields: NewItem, source: ItemSource) -> InventoryItem {
        let item = {
            let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);

            let mut id = ItemId::new();
            while items.iter().any(|existing| existing.id_typed() == id) {
                id = ItemId::new();
            }

            let item = InventoryItem::create(id, fields);
            items.push(item.clone());
            item
        };

        tracing::info!(item_id = %item.id_typed(), name = item.name(), ?source, "item added");
        self.publish(InventoryEvent::ItemAdded(ItemAdded {
            item: item.clone(),
            source,
            occurred_at: self.clock.now(),
        }));
        item
    }

    /// Replace the supplied fields on the matching item.
    ///
    /// Returns the updated item, or `None` (no-op) if `id` is unknown.
    pub fn update_item(&self, id: ItemId, patch: ItemPatch) -> Option<InventoryItem> {
        let updated = {
            let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
            let item = items.iter_mut().find(|item| item.id_typed() == id)?;
            item.apply(&patch);
            item.clone()
        };

        tracing::info!(item_id = %id, "item updated");
        self.publish(InventoryEvent::ItemUpdated(ItemUpdated {
            item: updated.clone(),
            occurred_at: self.clock.now(),
        }));
        Some(updated)
    }

    /// Delete the item permanently. Returns it, or `None` if it was absent.
    pub fn remove_item(&self, id: ItemId) -> Option<InventoryItem> {
        let removed = {
            let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
            let idx = items.iter().position(|item| item.id_typed() == id)?;
            items.remove(idx)
        };

        tracing::info!(item_id = %id, name = removed.name(), "item removed");
        self.publish(InventoryEvent::ItemRemoved(ItemRemoved {
            item_id: id,
            occurred_at: self.clock.now(),
        }));
        Some(removed)
    }

    /// Snapshot of every item, in insertion order.
    pub fn list_items(&self) -> Vec<InventoryItem> {
        self.items.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn get(&self, id: ItemId) -> Option<InventoryItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|item| item.id_typed() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn publish(&self, event: InventoryEvent) {
        if let Err(err) = self.events.publish(event) {
            tracing::warn!(?err, "failed to publish inventory event");
        }
    }
}
