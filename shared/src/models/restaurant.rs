//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Geographic point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Restaurant entity
///
/// Read-only reference data, seeded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// Cuisine tags in display order
    pub cuisines: Vec<String>,
    pub rating: f64,
    pub total_reviews: u32,
    /// Typical delivery time in minutes
    pub delivery_time: u32,
    /// Average price per person (currency units)
    pub avg_price: f64,
    pub is_veg: bool,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub is_open: bool,
}
