//! Data models
//!
//! Shared between the storefront server and API consumers.
//! Catalog entities (`Restaurant`, `Dish`) are read-only reference
//! data; `User` and `CartLine` are mutated only through their owning
//! services.

pub mod address;
pub mod cart;
pub mod dish;
pub mod restaurant;
pub mod user;

// Re-exports
pub use address::*;
pub use cart::*;
pub use dish::*;
pub use restaurant::*;
pub use user::*;
