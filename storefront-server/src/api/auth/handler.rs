//! Authentication handlers
//!
//! Registration, login, logout and password reset. Login and register
//! return an opaque bearer token the client sends back in the
//! `Authorization` header.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::PublicUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub phone: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/auth/register - create a customer account and log in
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .directory
        .register(&req.email, &req.password, &req.name, &req.phone)?;
    let session = state.sessions().issue(&user)?;
    Ok(Json(AuthResponse {
        token: session.token,
        user: PublicUser::from(&user),
    }))
}

/// POST /api/auth/login - exchange credentials for a session token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state.directory.authenticate(&req.email, &req.password)?;
    let session = state.sessions().issue(&user)?;
    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
    Ok(Json(AuthResponse {
        token: session.token,
        user: PublicUser::from(&user),
    }))
}

/// POST /api/auth/reset-password - recover access with email + phone
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .directory
        .reset_password(&req.email, &req.phone, &req.new_password)?;
    Ok(Json(MessageResponse {
        message: "Password updated",
    }))
}

/// POST /api/auth/logout - revoke the current session
pub async fn logout(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<MessageResponse>> {
    state.sessions().revoke(&user.token)?;
    Ok(Json(MessageResponse {
        message: "Logged out",
    }))
}

/// GET /api/auth/me - profile of the authenticated caller
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<PublicUser>> {
    let record = state
        .directory
        .get(&user.id)?
        .ok_or_else(|| AppError::not_found(format!("User {}", user.id)))?;
    Ok(Json(PublicUser::from(&record)))
}
