//! Admin dashboard handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::api::actor_for;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::money;
use crate::utils::AppResult;
use shared::models::PublicUser;
use shared::order::{Order, OrderStatus};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_orders: usize,
    pub active_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
    /// Sum of totals over all non-cancelled orders, rounded to 2dp
    pub total_revenue: f64,
    pub restaurants: usize,
    pub users: u64,
}

/// GET /api/admin/stats - storefront-wide counters
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AdminStats>> {
    let orders = state.store.get_all_orders()?;

    let mut active = 0;
    let mut delivered = 0;
    let mut cancelled = 0;
    let mut revenue = rust_decimal::Decimal::ZERO;
    for order in &orders {
        match order.status {
            OrderStatus::Delivered => delivered += 1,
            OrderStatus::Cancelled => cancelled += 1,
            _ => active += 1,
        }
        if order.status != OrderStatus::Cancelled {
            revenue += money::to_decimal(order.total);
        }
    }

    Ok(Json(AdminStats {
        total_orders: orders.len(),
        active_orders: active,
        delivered_orders: delivered,
        cancelled_orders: cancelled,
        total_revenue: money::to_f64(revenue),
        restaurants: state.catalog.restaurant_count(),
        users: state.directory.count()?,
    }))
}

/// GET /api/admin/orders - every order, newest first
pub async fn list_orders(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.store.get_all_orders()?;
    Ok(Json(orders))
}

/// POST /api/admin/orders/:id/confirm - pending to confirmed
pub async fn confirm_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .engine
        .advance_status(&id, OrderStatus::Confirmed, &actor_for(&user))?;
    Ok(Json(order))
}

/// POST /api/admin/orders/:id/cancel
pub async fn cancel_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.engine.cancel_order(&id, &actor_for(&user))?;
    Ok(Json(order))
}

/// GET /api/admin/users - registered users without credentials
pub async fn list_users(State(state): State<ServerState>) -> AppResult<Json<Vec<PublicUser>>> {
    let users = state.store.get_all_users()?;
    Ok(Json(users.iter().map(PublicUser::from).collect()))
}
