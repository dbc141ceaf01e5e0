//! Shared utilities and common types for the Storefront server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error payload returned by every endpoint
//! - Phone and email helpers (normalization, validation, masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, NotificationConfig,
    NotificationProvider, ServerConfig, VerificationConfig,
};
pub use errors::{ErrorMessage, ErrorResponse};
pub use utils::{email, phone};
