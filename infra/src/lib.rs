//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Storefront backend.
//! It provides concrete implementations for the ports defined in `sf_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool and `UserRepository` implementation using SQLx
//! - **Notify**: Brevo transactional email, an HTTP SMS gateway and a recording mock,
//!   combined behind the core `NotificationDispatcher` trait
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use sf_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Notification module - email and SMS providers
pub mod notify;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider error
    #[error("Email service error: {0}")]
    Email(String),

    /// SMS provider error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::Database(e.to_string()),
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
