//! Shared types for the Foodify storefront
//!
//! Data models and order types used by the storefront server and any
//! API consumer: users and roles, the restaurant catalog entities,
//! cart lines, delivery addresses and the order record itself.

pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{CartLine, DeliveryAddress, Dish, Restaurant, Role, User};
pub use order::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus};
