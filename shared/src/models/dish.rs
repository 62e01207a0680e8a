//! Dish Model

use serde::{Deserialize, Serialize};

/// Dish entity, keyed by restaurant
///
/// Read-only reference data like [`super::Restaurant`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub cuisine: String,
    pub is_veg: bool,
    pub rating: f64,
    #[serde(default)]
    pub is_popular: bool,
}
