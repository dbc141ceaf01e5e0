//! Verification code lifetimes and resend cooldowns

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Longest accepted secret lifetime (30 days)
pub const MAX_EXPIRY_MINUTES: i64 = 30 * 24 * 60;

/// Longest accepted resend cooldown (one day)
pub const MAX_COOLDOWN_SECONDS: i64 = 24 * 60 * 60;

/// Verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of an email verification token in minutes
    pub email_token_expiry_minutes: i64,

    /// Lifetime of a phone verification code in minutes
    pub phone_code_expiry_minutes: i64,

    /// Minimum seconds between two verification emails
    pub email_resend_cooldown_seconds: i64,

    /// Minimum seconds between two verification SMS
    pub sms_resend_cooldown_seconds: i64,

    /// Echo issued codes back in API responses (never in production)
    #[serde(default)]
    pub expose_dev_codes: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            email_token_expiry_minutes: 24 * 60,
            phone_code_expiry_minutes: 10,
            email_resend_cooldown_seconds: 60,
            sms_resend_cooldown_seconds: 60,
            expose_dev_codes: false,
        }
    }
}

impl VerificationConfig {
    /// Settings outside their accepted range, as human readable problems
    pub fn range_problems(&self) -> Vec<String> {
        let expiries = [
            ("VERIFICATION_EMAIL_EXPIRY_MINUTES", self.email_token_expiry_minutes),
            ("VERIFICATION_PHONE_EXPIRY_MINUTES", self.phone_code_expiry_minutes),
        ];
        let cooldowns = [
            ("VERIFICATION_EMAIL_COOLDOWN_SECONDS", self.email_resend_cooldown_seconds),
            ("VERIFICATION_SMS_COOLDOWN_SECONDS", self.sms_resend_cooldown_seconds),
        ];

        let mut problems = Vec::new();
        for (key, value) in expiries {
            if !(1..=MAX_EXPIRY_MINUTES).contains(&value) {
                problems.push(format!("{} must be between 1 and {}", key, MAX_EXPIRY_MINUTES));
            }
        }
        for (key, value) in cooldowns {
            if !(0..=MAX_COOLDOWN_SECONDS).contains(&value) {
                problems.push(format!("{} must be between 0 and {}", key, MAX_COOLDOWN_SECONDS));
            }
        }
        problems
    }

    /// Create from environment variables
    ///
    /// Development codes are exposed by default outside production and can
    /// be switched off with `VERIFICATION_DEV_CODES=false`.
    pub fn from_env(environment: Environment) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: i64| -> i64 {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };

        let expose_dev_codes = !environment.is_production()
            && std::env::var("VERIFICATION_DEV_CODES")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true);

        Self {
            email_token_expiry_minutes: read(
                "VERIFICATION_EMAIL_EXPIRY_MINUTES",
                defaults.email_token_expiry_minutes,
            ),
            phone_code_expiry_minutes: read(
                "VERIFICATION_PHONE_EXPIRY_MINUTES",
                defaults.phone_code_expiry_minutes,
            ),
            email_resend_cooldown_seconds: read(
                "VERIFICATION_EMAIL_COOLDOWN_SECONDS",
                defaults.email_resend_cooldown_seconds,
            ),
            sms_resend_cooldown_seconds: read(
                "VERIFICATION_SMS_COOLDOWN_SECONDS",
                defaults.sms_resend_cooldown_seconds,
            ),
            expose_dev_codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.phone_code_expiry_minutes, 10);
        assert_eq!(config.email_resend_cooldown_seconds, 60);
        assert_eq!(config.sms_resend_cooldown_seconds, 60);
        assert!(!config.expose_dev_codes);
    }

    #[test]
    fn test_range_problems() {
        assert!(VerificationConfig::default().range_problems().is_empty());

        let config = VerificationConfig {
            phone_code_expiry_minutes: i64::MAX / 10,
            sms_resend_cooldown_seconds: -1,
            ..Default::default()
        };
        let problems = config.range_problems();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("VERIFICATION_PHONE_EXPIRY_MINUTES"));
        assert!(problems[1].starts_with("VERIFICATION_SMS_COOLDOWN_SECONDS"));
    }

    #[test]
    fn test_production_never_exposes_dev_codes() {
        let config = VerificationConfig::from_env(Environment::Production);
        assert!(!config.expose_dev_codes);
    }
}
