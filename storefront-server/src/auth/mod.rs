//! Authentication
//!
//! Opaque session tokens and the middleware/extractors that resolve
//! them:
//! - [`SessionService`] - token issue/resolve/revoke
//! - [`CurrentUser`] - authenticated caller context
//! - [`require_auth`] / [`require_admin`] / [`require_partner`] - route guards

pub mod extractor;
pub mod middleware;
pub mod session;

pub use middleware::{require_admin, require_auth, require_partner};
pub use session::{CurrentUser, SessionService};
