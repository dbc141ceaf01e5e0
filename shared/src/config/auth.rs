//! Authentication configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Longest accepted session token lifetime in days
pub const MAX_TOKEN_EXPIRY_DAYS: i64 = 365;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Token lifetime in days
    pub expires_in_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            expires_in_days: 30,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in days
    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.expires_in_days = days;
        self
    }

    /// Whether the token lifetime is within 1 and [`MAX_TOKEN_EXPIRY_DAYS`]
    pub fn has_valid_expiry(&self) -> bool {
        (1..=MAX_TOKEN_EXPIRY_DAYS).contains(&self.expires_in_days)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Name of the cookie carrying the access token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Whether the token cookie is marked `Secure`
    #[serde(default)]
    pub secure_cookie: bool,

    /// bcrypt cost factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let expires_in_days = std::env::var("JWT_EXPIRES_IN_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let secure_cookie = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bcrypt_cost);

        Self {
            jwt: JwtConfig {
                secret,
                expires_in_days,
            },
            cookie_name: default_cookie_name(),
            secure_cookie,
            bcrypt_cost,
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_cookie_name() -> String {
    String::from("token")
}

fn default_bcrypt_cost() -> u32 {
    10
}
