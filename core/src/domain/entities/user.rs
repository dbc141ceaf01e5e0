//! User entity representing a registered storefront account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verification::{check_secret, SecretCheck, VerificationChannel};

/// Role attached to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A shopper
    #[default]
    Customer,
    /// Store staff with back-office access
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" | "user" => Ok(UserRole::Customer),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// User entity with its pending verification state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized (lower-case) email address
    pub email: String,

    /// Phone number in E.164 format
    pub phone: Option<String>,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: UserRole,

    /// Whether the email address has been confirmed
    pub email_verified: bool,

    /// Whether the phone number has been confirmed
    pub phone_verified: bool,

    /// SHA-256 digest of the pending email token
    #[serde(skip_serializing)]
    pub email_verification_token: Option<String>,

    /// Expiry of the pending email token
    pub email_verification_expires: Option<DateTime<Utc>>,

    /// Pending phone code
    #[serde(skip_serializing)]
    pub phone_verification_code: Option<String>,

    /// Expiry of the pending phone code
    pub phone_verification_expires: Option<DateTime<Utc>>,

    /// When the last verification email was dispatched
    pub last_verification_email_sent: Option<DateTime<Utc>>,

    /// When the last verification SMS was dispatched
    pub last_verification_sms_sent: Option<DateTime<Utc>>,

    /// Inactive accounts cannot log in or pass the auth gate
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new active, unverified customer
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            role: UserRole::Customer,
            email_verified: false,
            phone_verified: false,
            email_verification_token: None,
            email_verification_expires: None,
            phone_verification_code: None,
            phone_verification_expires: None,
            last_verification_email_sent: None,
            last_verification_sms_sent: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Whether the given channel is already verified
    pub fn is_verified(&self, channel: VerificationChannel) -> bool {
        match channel {
            VerificationChannel::Email => self.email_verified,
            VerificationChannel::Phone => self.phone_verified,
        }
    }

    /// Store a pending secret, replacing any earlier one for the channel
    ///
    /// For email the caller passes the token digest, never the raw token.
    pub fn set_pending_secret(
        &mut self,
        channel: VerificationChannel,
        secret: String,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        match channel {
            VerificationChannel::Email => {
                self.email_verification_token = Some(secret);
                self.email_verification_expires = Some(expires_at);
            }
            VerificationChannel::Phone => {
                self.phone_verification_code = Some(secret);
                self.phone_verification_expires = Some(expires_at);
            }
        }
        self.updated_at = now;
    }

    /// Drop the pending secret and its expiry for the channel
    pub fn clear_pending_secret(&mut self, channel: VerificationChannel, now: DateTime<Utc>) {
        match channel {
            VerificationChannel::Email => {
                self.email_verification_token = None;
                self.email_verification_expires = None;
            }
            VerificationChannel::Phone => {
                self.phone_verification_code = None;
                self.phone_verification_expires = None;
            }
        }
        self.updated_at = now;
    }

    /// Record a successful dispatch on the channel
    pub fn mark_sent(&mut self, channel: VerificationChannel, now: DateTime<Utc>) {
        match channel {
            VerificationChannel::Email => self.last_verification_email_sent = Some(now),
            VerificationChannel::Phone => self.last_verification_sms_sent = Some(now),
        }
        self.updated_at = now;
    }

    /// Last successful dispatch time for the channel
    pub fn last_sent(&self, channel: VerificationChannel) -> Option<DateTime<Utc>> {
        match channel {
            VerificationChannel::Email => self.last_verification_email_sent,
            VerificationChannel::Phone => self.last_verification_sms_sent,
        }
    }

    /// Seconds left before another send is allowed on the channel
    ///
    /// Returns 0 when a send is allowed. Partial seconds round up, and a
    /// last-sent time in the future never yields more than the full cooldown.
    pub fn cooldown_remaining(
        &self,
        channel: VerificationChannel,
        cooldown_seconds: i64,
        now: DateTime<Utc>,
    ) -> i64 {
        let Some(last_sent) = self.last_sent(channel) else {
            return 0;
        };

        let elapsed_ms = (now - last_sent).num_milliseconds().max(0);
        let cooldown_ms = cooldown_seconds.saturating_mul(1000);
        if elapsed_ms >= cooldown_ms {
            return 0;
        }

        let remaining_ms = cooldown_ms - elapsed_ms;
        (remaining_ms + 999) / 1000
    }

    /// Check a submitted secret and apply its consequences
    ///
    /// On a match the channel is marked verified and the secret is consumed.
    /// An expired secret is cleared. A mismatch leaves the stored secret as is.
    /// For email the caller passes the digest of the submitted token.
    pub fn consume_secret(
        &mut self,
        channel: VerificationChannel,
        provided: &str,
        now: DateTime<Utc>,
    ) -> SecretCheck {
        let outcome = match channel {
            VerificationChannel::Email => check_secret(
                self.email_verification_token.as_deref(),
                self.email_verification_expires,
                provided,
                now,
            ),
            VerificationChannel::Phone => check_secret(
                self.phone_verification_code.as_deref(),
                self.phone_verification_expires,
                provided,
                now,
            ),
        };

        match outcome {
            SecretCheck::Matched => {
                match channel {
                    VerificationChannel::Email => self.email_verified = true,
                    VerificationChannel::Phone => self.phone_verified = true,
                }
                self.clear_pending_secret(channel, now);
            }
            SecretCheck::Expired => self.clear_pending_secret(channel, now),
            SecretCheck::Mismatch | SecretCheck::Missing => {}
        }

        outcome
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
