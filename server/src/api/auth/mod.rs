//! Authentication module

mod context;
pub mod jwt;
mod manager;
pub mod middleware;

pub use context::{Auth, AuthContext};
pub use jwt::SessionClaims;
pub use manager::AuthManager;
pub use middleware::{AuthError, AuthState, require_auth};
