//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// A freshly signed session token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Service for signing and verifying session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Token lifetime, `None` when the configured day count is out of range
    pub fn lifetime(&self) -> Option<Duration> {
        Duration::try_days(self.config.expiry_days)
    }

    /// Signs a session token for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `now` - Issue time; expiry is `now` plus the configured lifetime
    pub fn issue(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let expires_at = self
            .lifetime()
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                tracing::error!(
                    expiry_days = self.config.expiry_days,
                    "Session token lifetime out of range"
                );
                DomainError::Internal {
                    message: "Session token lifetime out of range".to_string(),
                }
            })?;

        let claims = Claims::new(user_id, now, expires_at);
        let header = Header::new(self.config.algorithm);

        let token = encode(&header, &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is malformed, expired or signed with another key
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            })
    }

    /// Verifies a session token and returns the user it identifies
    ///
    /// Accepts both the flat `{id}` payload and the nested `{user: {id}}` one.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        self.decode_claims(token)?.user_id()
    }
}
