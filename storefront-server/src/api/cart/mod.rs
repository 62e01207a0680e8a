//! Cart API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route("/items/{dish_id}", put(handler::adjust_quantity).delete(handler::remove_item))
        .route("/items/{dish_id}/decrement", post(handler::decrement))
}
