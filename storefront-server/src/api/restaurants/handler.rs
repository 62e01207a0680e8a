//! Restaurant API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{Dish, Restaurant};

#[derive(Deserialize, Default)]
pub struct ListQuery {
    /// Free-text filter on name and cuisine
    pub q: Option<String>,
    /// Keep only fully vegetarian restaurants
    #[serde(default)]
    pub veg: bool,
}

/// GET /api/restaurants - list, optionally filtered by `q` and `veg`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Restaurant>>> {
    let q = query.q.as_deref().unwrap_or("");
    let restaurants = state
        .catalog
        .search(q, query.veg)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(restaurants))
}

/// GET /api/restaurants/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let restaurant = state
        .catalog
        .restaurant(&id)
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", id)))?;
    Ok(Json(restaurant.clone()))
}

/// GET /api/restaurants/:id/menu
pub async fn menu(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Dish>>> {
    if state.catalog.restaurant(&id).is_none() {
        return Err(AppError::not_found(format!("Restaurant {}", id)));
    }
    let dishes = state.catalog.menu(&id).into_iter().cloned().collect();
    Ok(Json(dishes))
}
