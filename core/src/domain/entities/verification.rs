//! Verification secrets for email and phone ownership checks.
//!
//! Phone verification uses a short numeric code delivered by SMS. Email
//! verification uses a long random token delivered as a link; only its
//! SHA-256 digest is persisted on the user record.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of the phone verification code
pub const PHONE_CODE_LENGTH: usize = 6;

/// Number of random bytes in an email verification token
pub const EMAIL_TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded email verification token
pub const EMAIL_TOKEN_LENGTH: usize = EMAIL_TOKEN_BYTES * 2;

/// Default phone code lifetime (10 minutes)
pub const PHONE_CODE_EXPIRATION_MINUTES: i64 = 10;

/// Default email token lifetime (24 hours)
pub const EMAIL_TOKEN_EXPIRATION_MINUTES: i64 = 24 * 60;

/// Default minimum spacing between two sends on the same channel
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Contact channel being verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationChannel {
    Email,
    Phone,
}

impl VerificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationChannel::Email => "email",
            VerificationChannel::Phone => "phone",
        }
    }
}

impl fmt::Display for VerificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing a submitted secret with the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretCheck {
    /// Secret matched and had not expired
    Matched,
    /// A secret is stored but the submitted value differs
    Mismatch,
    /// The stored secret is past its expiry
    Expired,
    /// Nothing is pending for this channel
    Missing,
}

/// Generate a 6-digit phone code from the OS random source
///
/// Leading zeros are kept so the code always has [`PHONE_CODE_LENGTH`] digits.
pub fn generate_phone_code() -> String {
    let code: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:06}", code)
}

/// Generate a 64-character hex email token from 32 random bytes
pub fn generate_email_token() -> String {
    let mut bytes = [0u8; EMAIL_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 digest of an email token, hex encoded
pub fn hash_email_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether a submitted phone code has the expected shape
pub fn is_valid_phone_code_format(code: &str) -> bool {
    code.len() == PHONE_CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}

/// Whether a submitted email token has the expected shape
pub fn is_valid_email_token_format(token: &str) -> bool {
    token.len() == EMAIL_TOKEN_LENGTH && token.chars().all(|c| c.is_ascii_hexdigit())
}

/// Compare a stored secret against a submitted one
///
/// A secret is valid while `now <= expires_at`. Comparison runs in constant
/// time so response timing does not reveal matching prefixes.
pub fn check_secret(
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    provided: &str,
    now: DateTime<Utc>,
) -> SecretCheck {
    let (stored, expires_at) = match (stored, expires_at) {
        (Some(stored), Some(expires_at)) => (stored, expires_at),
        _ => return SecretCheck::Missing,
    };

    if now > expires_at {
        return SecretCheck::Expired;
    }

    if constant_time_eq(stored.as_bytes(), provided.as_bytes()) {
        SecretCheck::Matched
    } else {
        SecretCheck::Mismatch
    }
}
