//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://prisma-backend-production-4c22.up.railway.app".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session token storage and validation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Primary token file
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Mirror kept in sync with the primary, still read by older releases
    #[serde(default = "default_legacy_token_path")]
    pub legacy_token_path: PathBuf,

    /// Keep a session from the token's own claims when the validation
    /// endpoint cannot be reached
    #[serde(default = "default_offline_fallback")]
    pub offline_fallback: bool,
}

fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_token_path() -> PathBuf {
    home_dir().join(".coursedesk").join("token")
}

fn default_legacy_token_path() -> PathBuf {
    home_dir().join(".coursedesk_token")
}

fn default_offline_fallback() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
            legacy_token_path: default_legacy_token_path(),
            offline_fallback: default_offline_fallback(),
        }
    }
}
