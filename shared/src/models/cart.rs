//! Cart Model

use serde::{Deserialize, Serialize};

/// One cart line
///
/// Invariant: every line in a cart carries the same `restaurant_id`;
/// the cart service rejects cross-restaurant adds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub dish_id: String,
    pub name: String,
    pub price: f64,
    /// Always >= 1; a line at quantity 0 is removed instead
    pub quantity: i32,
    pub restaurant_id: String,
    pub is_veg: bool,
}

/// Per-user cart document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Restaurant all current lines belong to (None when empty)
    pub fn restaurant_id(&self) -> Option<&str> {
        self.lines.first().map(|l| l.restaurant_id.as_str())
    }

    /// Total item count across lines (for badge display)
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
