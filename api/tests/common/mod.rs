//! Shared setup for the HTTP tests: in-memory repository, recording mock
//! provider and a clock the tests can move forward.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header, test, web};
use serde_json::{json, Value};

use sf_api::AppState;
use sf_core::repositories::{MockUserRepository, UserRepository};
use sf_core::services::{
    AuthService, AuthServiceConfig, ManualClock, TokenService, TokenServiceConfig,
    VerificationService, VerificationServiceConfig,
};
use sf_infra::notify::{MockNotifier, NotifierSettings, VerificationNotifier};
use sf_shared::AppConfig;

pub type TestState = AppState<MockUserRepository, VerificationNotifier>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub repo: Arc<MockUserRepository>,
    pub mock: MockNotifier,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    /// Development setup: secrets are echoed back and provider failures tolerated
    pub fn new() -> Self {
        Self::with_dev_mode(true)
    }

    /// Production-like setup: no dev codes, provider failures surface as 502
    pub fn production() -> Self {
        Self::with_dev_mode(false)
    }

    fn with_dev_mode(dev_mode: bool) -> Self {
        let config = AppConfig::default();
        let repo = Arc::new(MockUserRepository::new());
        let mock = MockNotifier::new();
        let clock = Arc::new(ManualClock::starting_now());

        let notifier = Arc::new(VerificationNotifier::new(
            Arc::new(mock.clone()),
            Arc::new(mock.clone()),
            NotifierSettings::default(),
        ));
        let verification_service = Arc::new(VerificationService::with_clock(
            repo.clone(),
            notifier,
            clock.clone(),
            VerificationServiceConfig {
                dev_mode,
                ..Default::default()
            },
        ));
        let auth_service = Arc::new(AuthService::with_clock(
            repo.clone(),
            verification_service.clone(),
            Arc::new(TokenService::new(TokenServiceConfig::default())),
            clock.clone(),
            AuthServiceConfig {
                bcrypt_cost: 4,
                ..Default::default()
            },
        ));

        Self {
            state: web::Data::new(AppState::new(auth_service, verification_service, &config)),
            repo,
            mock,
            clock,
        }
    }

    pub async fn deactivate(&self, email: &str) {
        let mut user = self.repo.find_by_email(email).await.unwrap().unwrap();
        user.deactivate();
        self.repo.update(user).await.unwrap();
    }
}

pub fn register_body(email: &str, phone: Option<&str>) -> Value {
    let mut body = json!({
        "name": "Sam Shopper",
        "email": email,
        "password": "hunter22",
    });
    if let Some(phone) = phone {
        body["phone"] = json!(phone);
    }
    body
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    test::read_body_json(resp).await
}

/// Extract the token from the verification link in an email body
pub fn link_token(text: &str) -> String {
    let start = text.find("/verify-email/").unwrap() + "/verify-email/".len();
    text[start..start + 64].to_string()
}

/// Extract the six digit code from an SMS body
pub fn sms_code(body: &str) -> String {
    body.chars().filter(|c| c.is_ascii_digit()).take(6).collect()
}
