//! Cart API handlers
//!
//! Every mutation returns the updated cart together with its computed
//! charges so the client never prices anything itself.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::cart::CartService;
use crate::core::ServerState;
use crate::orders::money::Charges;
use crate::utils::{AppError, AppResult};
use shared::models::Cart;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    #[serde(flatten)]
    pub cart: Cart,
    pub charges: Charges,
    pub item_count: i32,
}

impl CartView {
    fn of(cart: Cart) -> Self {
        let charges = CartService::totals(&cart);
        let item_count = cart.item_count();
        Self {
            cart,
            charges,
            item_count,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub dish_id: String,
}

#[derive(Deserialize)]
pub struct AdjustRequest {
    /// Signed change to the line quantity
    pub delta: i32,
}

/// GET /api/cart
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.get(&user.id)?;
    Ok(Json(CartView::of(cart)))
}

/// POST /api/cart/items - add one unit of a dish
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<CartView>> {
    let dish = state
        .catalog
        .dish(&req.dish_id)
        .ok_or_else(|| AppError::not_found(format!("Dish {}", req.dish_id)))?
        .clone();
    let cart = state.carts.add_item(&user.id, &dish)?;
    Ok(Json(CartView::of(cart)))
}

/// PUT /api/cart/items/:dish_id - adjust quantity by a signed delta,
/// clamped at one
pub async fn adjust_quantity(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(dish_id): Path<String>,
    Json(req): Json<AdjustRequest>,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.adjust_quantity(&user.id, &dish_id, req.delta)?;
    Ok(Json(CartView::of(cart)))
}

/// POST /api/cart/items/:dish_id/decrement - step down, removing the
/// line when it hits zero
pub async fn decrement(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(dish_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.decrement(&user.id, &dish_id)?;
    Ok(Json(CartView::of(cart)))
}

/// DELETE /api/cart/items/:dish_id
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(dish_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.remove_item(&user.id, &dish_id)?;
    Ok(Json(CartView::of(cart)))
}

/// DELETE /api/cart
pub async fn clear(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<CartView>> {
    state.carts.clear(&user.id)?;
    Ok(Json(CartView::of(Cart::default())))
}
