//! Unit tests for user entity

use chrono::{Duration, Utc};

use crate::domain::entities::user::{User, UserRole};
use crate::domain::entities::verification::{SecretCheck, VerificationChannel};

fn sample_user() -> User {
    User::new(
        "Jane Doe".to_string(),
        "jane@example.com".to_string(),
        "hashed_password".to_string(),
        Some("+14155552671".to_string()),
    )
}

#[test]
fn test_new_user_creation() {
    let user = sample_user();

    assert_eq!(user.role, UserRole::Customer);
    assert!(!user.email_verified);
    assert!(!user.phone_verified);
    assert!(user.is_active);
    assert!(user.email_verification_token.is_none());
    assert!(user.last_login_at.is_none());
}

#[test]
fn test_secrets_are_not_serialized() {
    let mut user = sample_user();
    let now = Utc::now();
    user.set_pending_secret(
        VerificationChannel::Phone,
        "123456".to_string(),
        now + Duration::minutes(10),
        now,
    );

    let value = serde_json::to_value(&user).unwrap();
    assert!(value.get("password_hash").is_none());
    assert!(value.get("phone_verification_code").is_none());
    assert!(value.get("email_verification_token").is_none());
}

#[test]
fn test_phone_code_consumed_on_match() {
    let mut user = sample_user();
    let now = Utc::now();
    user.set_pending_secret(
        VerificationChannel::Phone,
        "123456".to_string(),
        now + Duration::minutes(10),
        now,
    );

    let outcome = user.consume_secret(VerificationChannel::Phone, "123456", now);
    assert_eq!(outcome, SecretCheck::Matched);
    assert!(user.phone_verified);
    assert!(user.phone_verification_code.is_none());
    assert!(user.phone_verification_expires.is_none());

    // Re-submitting the consumed code must not succeed again
    let outcome = user.consume_secret(VerificationChannel::Phone, "123456", now);
    assert_eq!(outcome, SecretCheck::Missing);
}

#[test]
fn test_mismatch_keeps_stored_secret() {
    let mut user = sample_user();
    let now = Utc::now();
    user.set_pending_secret(
        VerificationChannel::Phone,
        "123456".to_string(),
        now + Duration::minutes(10),
        now,
    );

    let outcome = user.consume_secret(VerificationChannel::Phone, "000000", now);
    assert_eq!(outcome, SecretCheck::Mismatch);
    assert!(!user.phone_verified);
    assert_eq!(user.phone_verification_code.as_deref(), Some("123456"));
}

#[test]
fn test_expired_secret_is_cleared() {
    let mut user = sample_user();
    let now = Utc::now();
    user.set_pending_secret(
        VerificationChannel::Email,
        "digest".to_string(),
        now + Duration::minutes(10),
        now,
    );

    let later = now + Duration::minutes(11);
    let outcome = user.consume_secret(VerificationChannel::Email, "digest", later);
    assert_eq!(outcome, SecretCheck::Expired);
    assert!(!user.email_verified);
    assert!(user.email_verification_token.is_none());
    assert!(user.email_verification_expires.is_none());
}

#[test]
fn test_cooldown_remaining() {
    let mut user = sample_user();
    let now = Utc::now();

    assert_eq!(user.cooldown_remaining(VerificationChannel::Email, 60, now), 0);

    user.mark_sent(VerificationChannel::Email, now);
    assert_eq!(user.cooldown_remaining(VerificationChannel::Email, 60, now), 60);
    assert_eq!(
        user.cooldown_remaining(VerificationChannel::Email, 60, now + Duration::seconds(18)),
        42
    );
    assert_eq!(
        user.cooldown_remaining(
            VerificationChannel::Email,
            60,
            now + Duration::milliseconds(59_500)
        ),
        1
    );
    assert_eq!(
        user.cooldown_remaining(VerificationChannel::Email, 60, now + Duration::seconds(60)),
        0
    );

    // Channels are independent
    assert_eq!(user.cooldown_remaining(VerificationChannel::Phone, 60, now), 0);
}

#[test]
fn test_cooldown_with_future_last_sent_is_capped() {
    let mut user = sample_user();
    let now = Utc::now();
    user.mark_sent(VerificationChannel::Phone, now + Duration::minutes(5));

    assert_eq!(user.cooldown_remaining(VerificationChannel::Phone, 60, now), 60);
}

#[test]
fn test_role_parsing() {
    assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
    assert_eq!("Customer".parse::<UserRole>().unwrap(), UserRole::Customer);
    assert!("root".parse::<UserRole>().is_err());
}

#[test]
fn test_deactivate() {
    let mut user = sample_user();
    user.deactivate();
    assert!(!user.is_active);
}
