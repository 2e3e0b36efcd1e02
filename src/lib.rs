//! Coursedesk - Administer the course catalog from the terminal
//!
//! This is the library interface for Coursedesk, allowing programmatic
//! access to the catalog administration workflows.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod youtube;

pub use config::Config;
pub use error::Error;
pub use auth::SessionManager;
