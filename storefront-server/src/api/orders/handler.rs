//! Order API handlers
//!
//! Checkout settles payment through the gateway before the order is
//! created, so a cancelled or declined payment never leaves a record
//! behind. The tracking view projects the status pipeline and the
//! remaining delivery estimate for the client to render.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::api::actor_for;
use crate::auth::CurrentUser;
use crate::cart::CartService;
use crate::core::ServerState;
use crate::services::ChargeOutcome;
use crate::utils::{AppError, AppResult};
use shared::models::{DeliveryAddress, Role};
use shared::order::{Order, OrderStatus, PaymentMethod, PaymentStatus, STATUS_PIPELINE};
use shared::util::now_millis;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub delivery_address: DeliveryAddress,
    pub payment_method: PaymentMethod,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub completed: bool,
    pub active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    /// Pipeline projection, empty for cancelled orders
    pub steps: Vec<TrackingStep>,
    /// Minutes until the delivery estimate, absent once delivered or
    /// cancelled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_minutes: Option<i64>,
}

fn step_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Order Placed",
        OrderStatus::Confirmed => "Order Confirmed",
        OrderStatus::Preparing => "Preparing Your Food",
        OrderStatus::OnTheWay => "On the Way",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Cancelled => "Cancelled",
    }
}

fn detail_of(order: Order) -> OrderDetail {
    let steps = match order.status.pipeline_index() {
        Some(current) => STATUS_PIPELINE
            .iter()
            .enumerate()
            .map(|(i, &status)| TrackingStep {
                status,
                label: step_label(status),
                completed: i < current,
                active: i == current,
            })
            .collect(),
        None => Vec::new(),
    };
    let eta_minutes = match order.status {
        OrderStatus::Delivered | OrderStatus::Cancelled => None,
        // compute_eta yields milliseconds; round up so a nearly-due
        // order still shows one minute
        _ => Some(
            (crate::orders::engine::OrderEngine::compute_eta(&order, now_millis()) as u64)
                .div_ceil(60_000) as i64,
        ),
    };
    OrderDetail {
        order,
        steps,
        eta_minutes,
    }
}

/// The caller may see an order when they placed it, deliver it, or
/// hold the admin role
fn can_view(order: &Order, user: &CurrentUser) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Customer => order.user_id == user.id,
        Role::DeliveryPartner => order.delivery_partner_id.as_deref() == Some(user.id.as_str()),
    }
}

/// POST /api/orders - checkout the current cart
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    // The gateway must never be charged for an order that cannot be
    // placed, so the placement preconditions run first
    if !req.delivery_address.is_complete() {
        return Err(AppError::validation(
            "Please provide a complete delivery address",
        ));
    }
    let cart = state.carts.get(&user.id)?;
    if cart.is_empty() {
        return Err(AppError::validation("Your cart is empty"));
    }

    let payment_status = match req.payment_method {
        PaymentMethod::CashOnDelivery => PaymentStatus::CashOnDelivery,
        PaymentMethod::Online => {
            let charges = CartService::totals(&cart);
            let reference = format!("cart-{}", user.id);
            match state
                .payments
                .charge(&reference, charges.total, PaymentMethod::Online)
                .await
            {
                ChargeOutcome::Success => PaymentStatus::Paid,
                ChargeOutcome::Cancelled => {
                    return Err(AppError::business_rule("Payment was cancelled"));
                }
                ChargeOutcome::Failure(reason) => {
                    tracing::warn!(user_id = %user.id, %reason, "Payment failed");
                    return Err(AppError::business_rule("Payment failed, please try again"));
                }
            }
        }
    };

    let order = state
        .engine
        .place_order(&user.id, req.delivery_address, req.payment_method, payment_status)?;
    Ok(Json(order))
}

/// GET /api/orders - the caller's orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.store.get_orders_by_user(&user.id)?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - order detail with tracking projection
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let order = state
        .store
        .get_order(&id)?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    if !can_view(&order, &user) {
        return Err(AppError::forbidden("You cannot view this order"));
    }
    Ok(Json(detail_of(order)))
}

/// POST /api/orders/:id/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.engine.cancel_order(&id, &actor_for(&user))?;
    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, ServerState};
    use crate::services::PaymentGateway;
    use async_trait::async_trait;
    use shared::models::StructuredAddress;
    use shared::order::OrderItem;
    use shared::util::order_id;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn order_with(status: OrderStatus, estimated_delivery: i64) -> Order {
        let created_at = now_millis();
        Order {
            id: order_id(),
            user_id: "user-1".into(),
            restaurant_id: "rest-1".into(),
            delivery_partner_id: None,
            items: vec![OrderItem {
                dish_id: "dish-1".into(),
                name: "Dish 1".into(),
                price: 150.0,
                quantity: 2,
                total: 300.0,
            }],
            subtotal: 300.0,
            delivery_fee: 0.0,
            tax: 15.0,
            total: 315.0,
            delivery_address: address(),
            payment_method: PaymentMethod::CashOnDelivery,
            payment_status: PaymentStatus::CashOnDelivery,
            status,
            created_at,
            estimated_delivery,
            accepted_at: None,
            delivered_at: None,
        }
    }

    fn address() -> DeliveryAddress {
        DeliveryAddress::Structured(StructuredAddress {
            house_no: "42".into(),
            street: "MG Road".into(),
            landmark: None,
            area: "Indiranagar".into(),
            city: "Bengaluru".into(),
            pincode: "560038".into(),
            location: None,
        })
    }

    #[test]
    fn tracking_eta_is_reported_in_minutes() {
        let estimated = now_millis() + 35 * 60_000;
        let detail = detail_of(order_with(OrderStatus::Pending, estimated));
        assert_eq!(detail.eta_minutes, Some(35));

        // Past the estimate the field bottoms out at zero
        let overdue = detail_of(order_with(OrderStatus::OnTheWay, now_millis() - 60_000));
        assert_eq!(overdue.eta_minutes, Some(0));

        let delivered = detail_of(order_with(OrderStatus::Delivered, estimated));
        assert_eq!(delivered.eta_minutes, None);
    }

    #[test]
    fn tracking_steps_mark_progress() {
        let detail = detail_of(order_with(OrderStatus::Preparing, now_millis()));
        assert_eq!(detail.steps.len(), 5);
        assert!(detail.steps[0].completed && detail.steps[1].completed);
        assert!(detail.steps[2].active && !detail.steps[2].completed);
        assert!(!detail.steps[3].completed && !detail.steps[3].active);

        let cancelled = detail_of(order_with(OrderStatus::Cancelled, now_millis()));
        assert!(cancelled.steps.is_empty());
    }

    struct RecordingGateway {
        charges: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn charge(
            &self,
            _order_id: &str,
            _amount: f64,
            _method: PaymentMethod,
        ) -> ChargeOutcome {
            self.charges.fetch_add(1, Ordering::SeqCst);
            ChargeOutcome::Success
        }
    }

    fn state_with_recording_gateway() -> (ServerState, Arc<AtomicUsize>) {
        let config = Config::with_overrides("/tmp/unused", 0);
        let mut state = ServerState::initialize_in_memory(&config).unwrap();
        let charges = Arc::new(AtomicUsize::new(0));
        state.payments = Arc::new(RecordingGateway {
            charges: charges.clone(),
        });
        (state, charges)
    }

    fn demo_customer(state: &ServerState) -> CurrentUser {
        let user = state
            .directory
            .authenticate("demo@foodify.com", "demo123")
            .unwrap();
        CurrentUser {
            id: user.id,
            role: Role::Customer,
            token: "test-token".into(),
        }
    }

    #[tokio::test]
    async fn online_checkout_with_bad_address_never_reaches_the_gateway() {
        let (state, charges) = state_with_recording_gateway();
        let user = demo_customer(&state);
        let dish = state.catalog.menu(&state.catalog.restaurants()[0].id)[0].clone();
        state.carts.add_item(&user.id, &dish).unwrap();

        let result = checkout(
            State(state.clone()),
            user.clone(),
            Json(CheckoutRequest {
                delivery_address: DeliveryAddress::Legacy("   ".into()),
                payment_method: PaymentMethod::Online,
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(charges.load(Ordering::SeqCst), 0);
        // Nothing was placed and the cart is untouched
        assert!(state.store.get_orders_by_user(&user.id).unwrap().is_empty());
        assert!(!state.carts.get(&user.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn online_checkout_charges_once_and_marks_paid() {
        let (state, charges) = state_with_recording_gateway();
        let user = demo_customer(&state);
        let dish = state.catalog.menu(&state.catalog.restaurants()[0].id)[0].clone();
        state.carts.add_item(&user.id, &dish).unwrap();

        let Json(order) = checkout(
            State(state.clone()),
            user.clone(),
            Json(CheckoutRequest {
                delivery_address: address(),
                payment_method: PaymentMethod::Online,
            }),
        )
        .await
        .unwrap();

        assert_eq!(charges.load(Ordering::SeqCst), 1);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
