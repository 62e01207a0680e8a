//! Delivery partner API module
//!
//! Every route requires the delivery-partner role.

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::auth::require_partner;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/partner", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders/available", get(handler::available))
        .route("/orders", get(handler::mine))
        .route("/orders/{id}/accept", post(handler::accept))
        .route("/orders/{id}/status", post(handler::advance))
        .layer(axum_middleware::from_fn(require_partner))
}
