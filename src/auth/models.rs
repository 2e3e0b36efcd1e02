//! Session models

use serde::{Deserialize, Serialize};

/// Profile string the backend uses for administrator accounts
pub const ADMIN_PROFILE: &str = "ADMINISTRADOR";

/// User information as returned by the backend
///
/// The wire format keeps the backend's Portuguese field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Access profile, compared verbatim against [`ADMIN_PROFILE`]
    #[serde(rename = "perfil")]
    pub profile: String,
}

impl User {
    /// Check if the user holds the administrator profile
    pub fn is_admin(&self) -> bool {
        self.profile == ADMIN_PROFILE
    }
}

/// Session state as seen by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Bootstrap has not finished yet
    Resolving,
    /// A validated (or locally trusted) session
    Authenticated(User),
    /// No usable session
    Unauthenticated,
}

/// Login credentials
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response with token
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: User,
}

/// Body returned by the token validation endpoint
#[derive(Debug, Deserialize)]
pub struct ValidateResponse {
    pub user: User,
}
