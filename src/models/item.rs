use serde::{Deserialize, Serialize};

/// A stocked product. The id is assigned by the store and is exposed on the
/// wire as `item_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "item_id")]
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /items` and `PUT /items/:id`.
///
/// Absent fields fall back to zero values so that a sparse body reaches
/// validation instead of failing to parse. Any `item_id` sent by the client
/// is ignored; the store owns ids.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemPayload {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl ItemPayload {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Presence and sign checks applied on create. Updates skip these.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.price.is_finite() && self.price > 0.0 && self.quantity >= 0
    }

    pub(crate) fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}
