//! Auth middleware
//!
//! Resolves the bearer token on every `/api/` request and injects
//! [`CurrentUser`] into the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, SessionService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Paths reachable without a session
fn is_public_api_route(path: &str) -> bool {
    matches!(
        path,
        "/api/auth/login" | "/api/auth/register" | "/api/auth/reset-password" | "/api/health"
    )
}

/// Require a valid session on API routes.
///
/// Skips CORS preflight, non-API paths (they 404 normally) and the
/// public auth endpoints. On success the resolved [`CurrentUser`] is
/// stored in request extensions for handlers and role middleware.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") || is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => SessionService::extract_from_header(header)
            .ok_or_else(AppError::invalid_session)?,
        None => {
            tracing::warn!(uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    let user = state.sessions().resolve(token).inspect_err(|e| {
        tracing::warn!(uri = %req.uri(), error = %e, "Session resolution failed");
    })?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require the admin role. Layer after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, role = %user.role, "Admin route denied");
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(next.run(req).await)
}

/// Require the delivery-partner role. Layer after [`require_auth`].
pub async fn require_partner(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_delivery_partner() {
        tracing::warn!(user_id = %user.id, role = %user.role, "Partner route denied");
        return Err(AppError::forbidden("Delivery partner access required"));
    }
    Ok(next.run(req).await)
}
