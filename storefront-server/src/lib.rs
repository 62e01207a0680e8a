//! Foodify Storefront Server
//!
//! Backend for a food-ordering storefront. The heart of the crate is
//! the order lifecycle: a cart becomes an order, the order walks the
//! status pipeline `pending -> confirmed -> preparing -> on_the_way ->
//! delivered` (or drops to `cancelled`), and delivery partners race to
//! accept confirmed orders with first-writer-wins arbitration.
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # Config, state, server, background tasks
//! ├── auth/          # Session tokens, middleware, extractors
//! ├── catalog/       # Restaurants and dishes
//! ├── cart/          # Per-user cart operations
//! ├── orders/        # Order engine, money arithmetic
//! ├── services/      # User directory, payment gateway
//! ├── store/         # Embedded redb persistence
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod orders;
pub mod services;
pub mod store;
pub mod utils;

pub use auth::{CurrentUser, SessionService};
pub use cart::CartService;
pub use catalog::CatalogService;
pub use core::{Config, Server, ServerState};
pub use orders::engine::{Actor, OrderEngine};
pub use orders::{OrderError, OrderResult};
pub use services::{PaymentGateway, UserDirectory};
pub use store::Store;
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Initialize logging from the config: daily-rolling files in
/// production, stdout otherwise.
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    if config.is_production() {
        let log_dir = config.log_dir();
        std::fs::create_dir_all(&log_dir)?;
        init_logger_with_file(Some("info"), log_dir.to_str());
    } else {
        init_logger();
    }
    Ok(())
}
