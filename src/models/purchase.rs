use serde::{Deserialize, Serialize};

use super::Item;

/// A completed sale. Only the store creates these, and history entries are
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub item_id: i64,
    pub quantity: i64,
    /// Unit price at the time of sale times `quantity`.
    pub total_price: f64,
}

/// Body of `POST /purchase`. A client-sent `total_price` is ignored and, as
/// with [`super::ItemPayload`], absent fields default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PurchaseRequest {
    pub item_id: i64,
    pub quantity: i64,
}

/// Body of `GET /items`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InventorySnapshot {
    pub items: Vec<Item>,
    pub purchase_history: Vec<Purchase>,
}
