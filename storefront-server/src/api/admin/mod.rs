//! Admin API module
//!
//! Every route requires the admin role.

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/orders", get(handler::list_orders))
        .route("/orders/{id}/confirm", post(handler::confirm_order))
        .route("/orders/{id}/cancel", post(handler::cancel_order))
        .route("/users", get(handler::list_users))
        .layer(axum_middleware::from_fn(require_admin))
}
