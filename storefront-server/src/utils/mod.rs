//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logger setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, AppResult};
