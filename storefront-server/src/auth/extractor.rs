//! Session extractor
//!
//! Custom extractor that resolves the bearer token into a
//! [`CurrentUser`] for protected handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, SessionService};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse the identity the middleware already resolved
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => SessionService::extract_from_header(header)
                .ok_or_else(AppError::invalid_session)?,
            None => {
                tracing::warn!(uri = %parts.uri, "Missing authorization header");
                return Err(AppError::unauthorized());
            }
        };

        let user = state.sessions().resolve(token)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
