//! JWT claims for session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Default session token lifetime (30 days)
pub const TOKEN_EXPIRY_DAYS: i64 = 30;

/// Nested user object carried by tokens issued before the flat `id` claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyUserClaim {
    pub id: String,
}

/// Claims structure for the JWT payload
///
/// Current tokens carry `{id, iat, exp}`. Older tokens nest the identifier
/// as `{user: {id}}` and are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Legacy nested identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<LegacyUserClaim>,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a session token
    pub fn new(user_id: Uuid, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Some(user_id.to_string()),
            user: None,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Identifier as carried by the token, flat claim first
    pub fn subject(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or_else(|| self.user.as_ref().map(|u| u.id.as_str()))
    }

    /// Parses the user's UUID from the claims
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        let subject = self.subject().ok_or_else(|| TokenError::MissingClaim {
            claim: "id".to_string(),
        })?;
        Uuid::parse_str(subject).map_err(|_| TokenError::InvalidTokenFormat)
    }
}
