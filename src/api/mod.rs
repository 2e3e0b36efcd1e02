//! HTTP client for the catalog backend

pub mod client;
pub mod types;

pub use client::{ApiClient, LoginOutcome, ValidateOutcome};
pub use types::{ApiEnvelope, ErrorBody};
