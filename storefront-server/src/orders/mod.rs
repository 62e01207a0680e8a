//! Order lifecycle
//!
//! - [`engine`] - the lifecycle engine, sole writer of order status,
//!   partner assignment and timestamps
//! - [`money`] - precise charge computation (delivery fee, tax)

pub mod engine;
pub mod money;

pub use engine::{Actor, OrderEngine};
pub use money::Charges;

use shared::order::OrderStatus;
use thiserror::Error;

use crate::store::StorageError;

/// Lifecycle errors
///
/// Every operation either fully applies or fully rejects with one of
/// these; storage failures leave the store unchanged.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order already assigned to a delivery partner: {0}")]
    AlreadyAssigned(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type OrderResult<T> = Result<T, OrderError>;
