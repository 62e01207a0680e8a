//! Core module: configuration, state and server lifecycle
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared service handles
//! - [`Server`] - HTTP server
//! - [`BackgroundTasks`] - background task registry

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
pub use tasks::BackgroundTasks;
