//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and session cookie configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and log filter defaults
//! - `notification` - Email and SMS provider credentials
//! - `server` - HTTP server binding and CORS origin
//! - `verification` - Code lifetimes and resend cooldowns

pub mod auth;
pub mod database;
pub mod environment;
pub mod notification;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use notification::{NotificationConfig, NotificationProvider};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Notification provider configuration
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            verification: VerificationConfig::default(),
            notification: NotificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            verification: VerificationConfig::from_env(environment),
            notification: NotificationConfig::from_env(),
        }
    }

    /// Check the configuration for settings that must not reach production
    ///
    /// Returns a list of human readable problems; an empty list means the
    /// configuration may be used as is.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = self.verification.range_problems();

        if !self.auth.jwt.has_valid_expiry() {
            problems.push(format!(
                "JWT_EXPIRES_IN_DAYS must be between 1 and {}",
                auth::MAX_TOKEN_EXPIRY_DAYS
            ));
        }

        if self.environment.is_production() {
            if self.auth.jwt.is_using_default_secret() {
                problems.push("JWT_SECRET must be set in production".to_string());
            }
            if self.verification.expose_dev_codes {
                problems.push("Development codes cannot be exposed in production".to_string());
            }
            if self.notification.provider == NotificationProvider::Mock {
                problems.push("NOTIFICATION_PROVIDER=mock is not allowed in production".to_string());
            }
        }

        problems
    }
}
