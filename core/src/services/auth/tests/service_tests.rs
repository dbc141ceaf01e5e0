//! Unit tests for authentication service

use async_trait::async_trait;
use chrono::Duration;
use std::sync::{Arc, Mutex};

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::service::{hash_password, verify_password};
use crate::services::auth::{AuthService, AuthServiceConfig, Authenticator, RegisterInput};
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::verification::{
    NotificationDispatcher, VerificationService, VerificationServiceConfig,
};

#[derive(Default)]
struct RecordingDispatcher {
    emails: Mutex<Vec<(String, String)>>,
    sms: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send_email_verification(
        &self,
        email: &str,
        _name: &str,
        token: &str,
    ) -> Result<String, String> {
        if self.fail {
            return Err("provider down".to_string());
        }
        self.emails
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok("email-1".to_string())
    }

    async fn send_phone_code(&self, phone: &str, code: &str) -> Result<String, String> {
        if self.fail {
            return Err("provider down".to_string());
        }
        self.sms
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        Ok("sms-1".to_string())
    }
}

struct Fixture {
    repo: Arc<MockUserRepository>,
    dispatcher: Arc<RecordingDispatcher>,
    clock: Arc<ManualClock>,
    tokens: Arc<TokenService>,
    service: AuthService<MockUserRepository, RecordingDispatcher>,
}

fn fixture_with(dispatcher: RecordingDispatcher, dev_mode: bool) -> Fixture {
    let repo = Arc::new(MockUserRepository::new());
    let dispatcher = Arc::new(dispatcher);
    let clock = Arc::new(ManualClock::starting_now());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "auth-test-secret".to_string(),
        ..Default::default()
    }));
    let verification = Arc::new(VerificationService::with_clock(
        repo.clone(),
        dispatcher.clone(),
        clock.clone(),
        VerificationServiceConfig {
            dev_mode,
            ..Default::default()
        },
    ));
    let service = AuthService::with_clock(
        repo.clone(),
        verification,
        tokens.clone(),
        clock.clone(),
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );

    Fixture {
        repo,
        dispatcher,
        clock,
        tokens,
        service,
    }
}

fn fixture() -> Fixture {
    fixture_with(RecordingDispatcher::default(), false)
}

fn input(email: &str, phone: Option<&str>) -> RegisterInput {
    RegisterInput {
        name: "Jane Doe".to_string(),
        email: email.to_string(),
        password: "secret123".to_string(),
        phone: phone.map(str::to_string),
    }
}

#[tokio::test]
async fn test_register_creates_user_and_issues_email_token() {
    let fx = fixture();

    let outcome = fx
        .service
        .register(input("Jane@Example.com", None))
        .await
        .unwrap();

    assert_eq!(outcome.user.email, "jane@example.com");
    assert!(!outcome.user.email_verified);
    assert!(outcome.user.email_verification_token.is_some());
    assert!(outcome.user.last_verification_email_sent.is_some());
    assert!(outcome.dev_codes.is_empty());
    assert_eq!(fx.dispatcher.emails.lock().unwrap().len(), 1);
    assert!(fx.dispatcher.sms.lock().unwrap().is_empty());
    assert_eq!(fx.tokens.verify(&outcome.token.token).unwrap(), outcome.user.id);
}

#[tokio::test]
async fn test_register_with_phone_issues_both_secrets() {
    let fx = fixture_with(RecordingDispatcher::default(), true);

    let outcome = fx
        .service
        .register(input("jane@example.com", Some("+1 (415) 555-2671")))
        .await
        .unwrap();

    assert_eq!(outcome.user.phone.as_deref(), Some("+14155552671"));
    // Both pending secrets survive on the stored record
    assert!(outcome.user.email_verification_token.is_some());
    assert!(outcome.user.phone_verification_code.is_some());
    assert_eq!(outcome.dev_codes.phone, outcome.user.phone_verification_code);
    assert!(outcome.dev_codes.email.is_some());
}

#[tokio::test]
async fn test_register_tolerates_dispatch_failure() {
    let fx = fixture_with(
        RecordingDispatcher {
            fail: true,
            ..Default::default()
        },
        false,
    );

    let outcome = fx
        .service
        .register(input("jane@example.com", Some("+14155552671")))
        .await
        .unwrap();

    assert!(outcome.dev_codes.is_empty());
    assert!(fx.repo.exists_by_email("jane@example.com").await.unwrap());
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let fx = fixture();
    fx.service
        .register(input("jane@example.com", None))
        .await
        .unwrap();

    let err = fx
        .service
        .register(input("JANE@example.com", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserAlreadyExists)));
}

#[tokio::test]
async fn test_register_validation() {
    let fx = fixture();

    let mut bad = input("jane@example.com", None);
    bad.name = "   ".to_string();
    assert!(matches!(
        fx.service.register(bad).await.unwrap_err(),
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));

    assert!(matches!(
        fx.service.register(input("not-an-email", None)).await.unwrap_err(),
        DomainError::ValidationErr(ValidationError::InvalidEmail)
    ));

    let mut short = input("jane@example.com", None);
    short.password = "123".to_string();
    assert!(matches!(
        fx.service.register(short).await.unwrap_err(),
        DomainError::ValidationErr(ValidationError::PasswordTooShort { min: 6 })
    ));

    assert!(matches!(
        fx.service
            .register(input("jane@example.com", Some("555-2671")))
            .await
            .unwrap_err(),
        DomainError::ValidationErr(ValidationError::InvalidPhone)
    ));

    assert!(fx.repo.is_empty().await);
}

#[tokio::test]
async fn test_login_success_updates_last_login() {
    let fx = fixture();
    fx.service
        .register(input("jane@example.com", None))
        .await
        .unwrap();

    fx.clock.advance(Duration::hours(1));
    let outcome = fx
        .service
        .login(" Jane@Example.com ", "secret123")
        .await
        .unwrap();

    assert_eq!(outcome.user.last_login_at, Some(fx.clock.now()));
    assert_eq!(fx.tokens.verify(&outcome.token.token).unwrap(), outcome.user.id);
}

#[tokio::test]
async fn test_login_failures_are_generic() {
    let fx = fixture();
    fx.service
        .register(input("jane@example.com", None))
        .await
        .unwrap();

    let wrong_password = fx
        .service
        .login("jane@example.com", "nope-nope")
        .await
        .unwrap_err();
    let unknown_email = fx
        .service
        .login("ghost@example.com", "secret123")
        .await
        .unwrap_err();

    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_login_inactive_account() {
    let fx = fixture();
    let outcome = fx
        .service
        .register(input("jane@example.com", None))
        .await
        .unwrap();

    let mut user = outcome.user;
    user.deactivate();
    fx.repo.update(user).await.unwrap();

    let err = fx
        .service
        .login("jane@example.com", "secret123")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountInactive)));
}

#[tokio::test]
async fn test_authenticate_resolves_active_user() {
    let fx = fixture();
    let outcome = fx
        .service
        .register(input("jane@example.com", None))
        .await
        .unwrap();

    let authenticator: &dyn Authenticator = &fx.service;
    let user = authenticator
        .authenticate(Some(&outcome.token.token))
        .await
        .unwrap();
    assert_eq!(user.id, outcome.user.id);
}

#[tokio::test]
async fn test_authenticate_rejects_inactive_user_with_valid_token() {
    let fx = fixture();
    let outcome = fx
        .service
        .register(input("jane@example.com", None))
        .await
        .unwrap();

    let mut user = outcome.user;
    user.deactivate();
    fx.repo.update(user).await.unwrap();

    let err = fx
        .service
        .resolve_session(Some(&outcome.token.token))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountInactive)));
}

#[tokio::test]
async fn test_authenticate_missing_and_invalid_tokens() {
    let fx = fixture();

    assert!(matches!(
        fx.service.resolve_session(None).await.unwrap_err(),
        DomainError::Auth(AuthError::MissingToken)
    ));
    assert!(matches!(
        fx.service.resolve_session(Some("  ")).await.unwrap_err(),
        DomainError::Auth(AuthError::MissingToken)
    ));
    assert!(matches!(
        fx.service.resolve_session(Some("garbage")).await.unwrap_err(),
        DomainError::Auth(AuthError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_authenticate_unknown_user() {
    let fx = fixture();
    let token = fx
        .tokens
        .issue(uuid::Uuid::new_v4(), fx.clock.now())
        .unwrap();

    let err = fx
        .service
        .resolve_session(Some(&token.token))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_password_hashing_runs_on_blocking_pool() {
    let hash = hash_password("hunter22".to_string(), 4).await.unwrap();

    assert!(verify_password("hunter22".to_string(), hash.clone()).await);
    assert!(!verify_password("hunter23".to_string(), hash).await);
    assert!(!verify_password("hunter22".to_string(), "not-a-hash".to_string()).await);
}

#[tokio::test]
async fn test_invalid_bcrypt_cost_is_an_internal_error() {
    let err = hash_password("hunter22".to_string(), 2).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
}
