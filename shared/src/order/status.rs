//! Order status pipeline and payment labels

use serde::{Deserialize, Serialize};

/// Fixed delivery pipeline step order, used by tracking views
pub const STATUS_PIPELINE: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::OnTheWay,
    OrderStatus::Delivered,
];

/// Position in the delivery pipeline.
///
/// Linear machine with one absorbing alternate state:
///
/// ```text
/// pending -> confirmed -> preparing -> on_the_way -> delivered
/// any non-terminal ------------------------------> cancelled
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The immediate successor on the forward path, None for
    /// `delivered` and `cancelled`.
    pub fn successor(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OnTheWay),
            OrderStatus::OnTheWay => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Index into [`STATUS_PIPELINE`], None for `cancelled`
    pub fn pipeline_index(&self) -> Option<usize> {
        STATUS_PIPELINE.iter().position(|s| s == self)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::OnTheWay => write!(f, "on_the_way"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// How the customer chose to pay
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Online,
    CashOnDelivery,
}

/// Payment status label on the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    CashOnDelivery,
}
