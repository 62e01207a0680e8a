//! Unified error handling
//!
//! Application-level error type and response structure:
//! - [`AppError`] - error enum mapped to HTTP status codes
//! - [`AppResponse`] - API response envelope
//!
//! # Usage
//!
//! ```ignore
//! Err(AppError::not_found("Order not found"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::orders::OrderError;
use crate::store::StorageError;

/// Error response envelope
///
/// Success payloads go out as plain JSON bodies; this envelope only
/// wraps failures so clients can always read `error`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    /// Error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401/403) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business logic (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System (5xx) ==========
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Unauthorized
    }

    pub fn invalid_session() -> Self {
        AppError::InvalidSession
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        AppError::BusinessRule(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::Validation(msg),
            OrderError::AlreadyAssigned(id) => {
                AppError::Conflict(format!("Order {} already has a delivery partner", id))
            }
            OrderError::InvalidTransition { from, to } => {
                AppError::BusinessRule(format!("Cannot move order from {} to {}", from, to))
            }
            OrderError::NotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            OrderError::Forbidden(msg) => AppError::Forbidden(msg),
            OrderError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized | AppError::InvalidSession => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body: AppResponse<()> = AppResponse::error(self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Result alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderStatus;

    #[test]
    fn order_errors_map_to_conflict_and_unprocessable() {
        let app: AppError = OrderError::AlreadyAssigned("ORD-1".into()).into();
        assert!(matches!(app, AppError::Conflict(_)));

        let app: AppError = OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::OnTheWay,
        }
        .into();
        assert!(matches!(app, AppError::BusinessRule(_)));
    }
}
