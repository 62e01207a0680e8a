//! API routes
//!
//! One module per resource, each exposing a `router()` nested under
//! its `/api/...` prefix:
//!
//! - [`health`] - liveness check, public
//! - [`auth`] - register / login / logout / password reset
//! - [`restaurants`] - catalog browsing, any authenticated user
//! - [`cart`] - the caller's cart
//! - [`orders`] - checkout, tracking and cancellation
//! - [`partner`] - delivery partner dashboard
//! - [`admin`] - admin dashboard

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::engine::Actor;
use shared::models::Role;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod partner;
pub mod restaurants;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Map an authenticated caller to an order-engine actor
pub(crate) fn actor_for(user: &CurrentUser) -> Actor {
    match user.role {
        Role::Customer => Actor::Customer {
            user_id: user.id.clone(),
        },
        Role::DeliveryPartner => Actor::DeliveryPartner {
            user_id: user.id.clone(),
        },
        Role::Admin => Actor::Admin {
            user_id: user.id.clone(),
        },
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(partner::router())
        .merge(admin::router())
}

/// Build the fully configured application with middleware attached
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
}
