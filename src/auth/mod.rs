//! Authentication and session management

pub mod claims;
pub mod guard;
pub mod models;
pub mod session;
pub mod store;

pub use claims::{decode_claims, has_jwt_shape, TokenClaims};
pub use guard::{edge_check, login_redirect, route_decision, GuardDecision};
pub use models::{AuthState, User, ADMIN_PROFILE};
pub use session::SessionManager;
pub use store::TokenStore;
