//! Delivery partner handlers
//!
//! Acceptance is first-writer-wins: the losing partner gets a 409 and
//! the assignment stands untouched.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::api::actor_for;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::order::{Order, OrderStatus};

#[derive(Deserialize)]
pub struct AdvanceRequest {
    pub status: OrderStatus,
}

/// GET /api/partner/orders/available - confirmed, unassigned orders
pub async fn available(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.engine.list_available()?;
    Ok(Json(orders))
}

/// GET /api/partner/orders - orders assigned to the caller
pub async fn mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.store.get_orders_by_partner(&user.id)?;
    Ok(Json(orders))
}

/// POST /api/partner/orders/:id/accept
pub async fn accept(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.engine.accept_order(&id, &actor_for(&user))?;
    Ok(Json(order))
}

/// POST /api/partner/orders/:id/status - move the order one step
/// along the pipeline
pub async fn advance(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<AdvanceRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .engine
        .advance_status(&id, req.status, &actor_for(&user))?;
    Ok(Json(order))
}
