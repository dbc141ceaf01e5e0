//! Configuration for the verification service

use sf_shared::VerificationConfig;

use crate::domain::entities::verification::{
    VerificationChannel, EMAIL_TOKEN_EXPIRATION_MINUTES, PHONE_CODE_EXPIRATION_MINUTES,
    RESEND_COOLDOWN_SECONDS,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minutes before an email token expires
    pub email_token_expiration_minutes: i64,
    /// Minutes before a phone code expires
    pub phone_code_expiration_minutes: i64,
    /// Minimum seconds between two verification emails
    pub email_resend_cooldown_seconds: i64,
    /// Minimum seconds between two verification SMS
    pub sms_resend_cooldown_seconds: i64,
    /// Echo issued secrets to the caller and tolerate dispatch failures
    pub dev_mode: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            email_token_expiration_minutes: EMAIL_TOKEN_EXPIRATION_MINUTES,
            phone_code_expiration_minutes: PHONE_CODE_EXPIRATION_MINUTES,
            email_resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            sms_resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            dev_mode: false,
        }
    }
}

impl VerificationServiceConfig {
    /// Secret lifetime for a channel, in minutes
    pub fn expiration_minutes(&self, channel: VerificationChannel) -> i64 {
        match channel {
            VerificationChannel::Email => self.email_token_expiration_minutes,
            VerificationChannel::Phone => self.phone_code_expiration_minutes,
        }
    }

    /// Resend cooldown for a channel, in seconds
    pub fn cooldown_seconds(&self, channel: VerificationChannel) -> i64 {
        match channel {
            VerificationChannel::Email => self.email_resend_cooldown_seconds,
            VerificationChannel::Phone => self.sms_resend_cooldown_seconds,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            email_token_expiration_minutes: config.email_token_expiry_minutes,
            phone_code_expiration_minutes: config.phone_code_expiry_minutes,
            email_resend_cooldown_seconds: config.email_resend_cooldown_seconds,
            sms_resend_cooldown_seconds: config.sms_resend_cooldown_seconds,
            dev_mode: config.expose_dev_codes,
        }
    }
}
