//! Payment boundary
//!
//! Checkout talks to a gateway through this trait so the order flow
//! never depends on a concrete provider. The mock gateway approves
//! everything and stands in until a real integration lands.

use async_trait::async_trait;
use shared::order::PaymentMethod;

/// Outcome of a charge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// Funds captured (or cash on delivery acknowledged)
    Success,
    /// The user backed out of the payment flow
    Cancelled,
    /// The provider declined or errored
    Failure(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempt to charge `amount` for `order_id` via `method`
    async fn charge(
        &self,
        order_id: &str,
        amount: f64,
        method: PaymentMethod,
    ) -> ChargeOutcome;
}

/// Gateway that approves every charge
#[derive(Debug, Default)]
pub struct MockGateway;

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn charge(&self, order_id: &str, amount: f64, method: PaymentMethod) -> ChargeOutcome {
        tracing::debug!(%order_id, amount, ?method, "Mock gateway approving charge");
        ChargeOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_gateway_approves() {
        let gateway = MockGateway;
        let outcome = gateway
            .charge("ORD-1", 315.0, PaymentMethod::Online)
            .await;
        assert_eq!(outcome, ChargeOutcome::Success);
    }
}
