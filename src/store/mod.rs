use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{InventorySnapshot, Item, ItemPayload, Purchase, PurchaseRequest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Invalid item data")]
    InvalidItem,

    #[error("Invalid purchase quantity {0}")]
    InvalidQuantity(i64),

    #[error("Item {0} not found")]
    NotFound(i64),

    #[error("Insufficient stock for item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: i64,
        requested: i64,
        available: i64,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whether `create_or_merge` appended a new item or topped up an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Merged,
}

// ── Unlocked state ────────────────────────────────────────────────────────────

/// Items, purchase history and the id counter. Only ever touched through the
/// mutex in [`InventoryStore`].
#[derive(Debug, Default)]
struct Inventory {
    /// Keyed by id, iterated in insertion order.
    items: IndexMap<i64, Item>,
    purchase_history: Vec<Purchase>,
    /// Highest id handed out so far. Never decreases.
    last_id: i64,
}

impl Inventory {
    fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.items.values().cloned().collect(),
            purchase_history: self.purchase_history.clone(),
        }
    }

    fn create_or_merge(&mut self, payload: ItemPayload) -> StoreResult<(Item, CreateOutcome)> {
        if !payload.is_valid() {
            return Err(StoreError::InvalidItem);
        }

        // First item with a matching name wins.
        if let Some(existing) = self.items.values_mut().find(|i| i.name == payload.name) {
            existing.quantity = existing
                .quantity
                .checked_add(payload.quantity)
                .ok_or(StoreError::InvalidItem)?;
            return Ok((existing.clone(), CreateOutcome::Merged));
        }

        self.last_id += 1;
        let item = payload.into_item(self.last_id);
        self.items.insert(item.id, item.clone());
        Ok((item, CreateOutcome::Created))
    }

    fn get(&self, id: i64) -> StoreResult<Item> {
        self.items.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn update(&mut self, id: i64, payload: ItemPayload) -> StoreResult<Item> {
        let slot = self.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = payload.into_item(id);
        Ok(slot.clone())
    }

    fn delete(&mut self, id: i64) -> StoreResult<Item> {
        self.items.shift_remove(&id).ok_or(StoreError::NotFound(id))
    }

    fn purchase(&mut self, request: PurchaseRequest) -> StoreResult<Purchase> {
        // A negative purchase would restock the item.
        if request.quantity < 0 {
            return Err(StoreError::InvalidQuantity(request.quantity));
        }

        let item = self
            .items
            .get_mut(&request.item_id)
            .ok_or(StoreError::NotFound(request.item_id))?;

        if item.quantity < request.quantity {
            return Err(StoreError::InsufficientStock {
                item_id: item.id,
                requested: request.quantity,
                available: item.quantity,
            });
        }

        item.quantity -= request.quantity;
        let purchase = Purchase {
            item_id: item.id,
            quantity: request.quantity,
            total_price: item.price * request.quantity as f64,
        };
        self.purchase_history.push(purchase.clone());
        Ok(purchase)
    }
}

// ── Shared store ──────────────────────────────────────────────────────────────

/// The in-memory inventory. Every operation takes the same exclusive lock
/// once and does no I/O while holding it, so a purchase's
/// check/decrement/append sequence cannot interleave with any other write.
#[derive(Debug, Default)]
pub struct InventoryStore {
    inner: Mutex<Inventory>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in insertion order plus the full purchase history.
    pub async fn snapshot(&self) -> InventorySnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Validates `payload`, then either adds its quantity to the first item
    /// with the same name or appends it under the next id.
    pub async fn create_or_merge(&self, payload: ItemPayload) -> StoreResult<(Item, CreateOutcome)> {
        self.inner.lock().await.create_or_merge(payload)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Item> {
        self.inner.lock().await.get(id)
    }

    /// Replaces everything but the id. No field validation.
    pub async fn update(&self, id: i64, payload: ItemPayload) -> StoreResult<Item> {
        self.inner.lock().await.update(id, payload)
    }

    /// Removes and returns the item. Its id is not reused.
    pub async fn delete(&self, id: i64) -> StoreResult<Item> {
        self.inner.lock().await.delete(id)
    }

    pub async fn purchase(&self, request: PurchaseRequest) -> StoreResult<Purchase> {
        self.inner.lock().await.purchase(request)
    }

    pub async fn item_count(&self) -> usize {
        self.inner.lock().await.items.len()
    }
}
