//! Order record and status pipeline
//!
//! The order is the central entity of the storefront. It is created
//! atomically from a non-empty cart at checkout and afterwards
//! mutated only through the lifecycle engine; cancellation is a
//! status, never a deletion.

pub mod status;

pub use status::{OrderStatus, PaymentMethod, PaymentStatus, STATUS_PIPELINE};

use serde::{Deserialize, Serialize};

use crate::models::DeliveryAddress;

/// Immutable snapshot of one cart line taken at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub dish_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    /// Line total: price * quantity, rounded to 2 decimals
    pub total: f64,
}

/// The order record
///
/// Money invariants (enforced by the engine at creation, never
/// recomputed afterwards):
/// - `total == subtotal + delivery_fee + tax`
/// - `delivery_fee == 0` when `subtotal > 200`, else flat `40`
/// - `tax == round2(subtotal * 0.05)`
///
/// `delivery_partner_id` is None until a partner accepts and never
/// changes once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    #[serde(default)]
    pub delivery_partner_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub total: f64,
    pub delivery_address: DeliveryAddress,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    /// Creation timestamp (UTC millis)
    pub created_at: i64,
    /// Promised delivery timestamp (UTC millis)
    pub estimated_delivery: i64,
    /// Stamped when a delivery partner accepts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<i64>,
    /// Stamped on the transition to `delivered`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
}

impl Order {
    /// Whether a delivery partner can pick this order up
    pub fn is_available_for_pickup(&self) -> bool {
        self.status == OrderStatus::Confirmed && self.delivery_partner_id.is_none()
    }
}
