//! Integration tests for the email and phone verification endpoints

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::json;

use common::{bearer, json_body, link_token, register_body, sms_code, TestContext};
use sf_api::create_app;
use sf_core::repositories::UserRepository;

const EMAIL: &str = "sam@example.com";
const PHONE: &str = "+14155552671";

/// Register the default shopper and return the session token
macro_rules! register {
    ($app:expr, $phone:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body(EMAIL, $phone))
            .to_request();
        let body = json_body(test::call_service(&$app, req).await).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_email_verification_flow() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, None);

    // Registration started the cooldown
    let req = test::TestRequest::post()
        .uri("/api/users/send-email-verification")
        .insert_header(bearer(&token))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("retry-after"));
    let body = json_body(resp).await;
    assert!(body["errors"][0]["msg"]
        .as_str()
        .unwrap()
        .contains("seconds before requesting a new email verification"));

    ctx.clock.advance(Duration::seconds(61));

    let req = test::TestRequest::post()
        .uri("/api/users/send-email-verification")
        .insert_header(bearer(&token))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    let dev_code = body["devCode"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/users/verify-email")
        .insert_header(bearer(&token))
        .set_json(json!({ "token": dev_code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user = ctx.repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(user.email_verified);
    assert!(user.email_verification_token.is_none());

    // Single use
    let req = test::TestRequest::post()
        .uri("/api/users/verify-email")
        .insert_header(bearer(&token))
        .set_json(json!({ "token": dev_code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_email_link_verifies_without_session() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    register!(app, None);

    let email = ctx.mock.last_email_to(EMAIL).unwrap();
    let uri = format!("/api/users/verify-email/{}", link_token(&email.text));

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Email verified successfully");

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_email_verification_status_counts_down() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, None);

    ctx.clock.advance(Duration::seconds(18));

    let req = test::TestRequest::get()
        .uri("/api/users/email-verification-status")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(
        body,
        json!({
            "emailVerified": false,
            "canResendEmail": false,
            "resendAvailableIn": 42
        })
    );
}

#[actix_web::test]
async fn test_phone_code_wrong_then_right() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, Some(PHONE));
    let code = sms_code(&ctx.mock.last_sms_to(PHONE).unwrap());
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-phone")
        .insert_header(bearer(&token))
        .set_json(json!({ "verificationCode": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["errors"][0]["msg"], "Invalid or expired verification code");

    // A mismatch keeps the pending code
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-phone")
        .insert_header(bearer(&token))
        .set_json(json!({ "verificationCode": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user = ctx.repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(user.phone_verified);
}

#[actix_web::test]
async fn test_expired_phone_code_gets_the_same_message() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, Some(PHONE));
    let code = sms_code(&ctx.mock.last_sms_to(PHONE).unwrap());

    ctx.clock.advance(Duration::minutes(10) + Duration::seconds(1));

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-phone")
        .insert_header(bearer(&token))
        .set_json(json!({ "verificationCode": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["errors"][0]["msg"], "Invalid or expired verification code");

    let user = ctx.repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(!user.phone_verified);
    assert!(user.phone_verification_code.is_none());
}

#[actix_web::test]
async fn test_malformed_phone_code_is_a_validation_error() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, Some(PHONE));

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-phone")
        .insert_header(bearer(&token))
        .set_json(json!({ "verificationCode": "12ab56" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["errors"][0]["msg"], "Verification code must be 6 digits");
}

#[actix_web::test]
async fn test_resend_phone_code_after_cooldown_replaces_old_code() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, Some(PHONE));
    let first = sms_code(&ctx.mock.last_sms_to(PHONE).unwrap());

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-verification")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // Cooldown rejection left the first code in place
    let user = ctx.repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(user.phone_verification_code.as_deref(), Some(first.as_str()));

    ctx.clock.advance(Duration::seconds(60));

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-verification")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["resendAvailableIn"], 60);
    let second = body["devCode"].as_str().unwrap().to_string();

    let user = ctx.repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(user.phone_verification_code.as_deref(), Some(second.as_str()));
}

#[actix_web::test]
async fn test_resend_without_phone_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, None);

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-verification")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["errors"][0]["msg"], "No phone number on file");
}

#[actix_web::test]
async fn test_production_hides_codes_and_reports_provider_failure() {
    let ctx = TestContext::production();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body(EMAIL, None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert!(body.get("devCodes").is_none());
    let token = body["token"].as_str().unwrap().to_string();

    ctx.clock.advance(Duration::seconds(61));
    ctx.mock.set_simulate_failure(true);

    let req = test::TestRequest::post()
        .uri("/api/users/send-email-verification")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(resp).await;
    assert_eq!(
        body["errors"][0]["msg"],
        "Failed to send email verification. Please try again later"
    );

    // Nothing was delivered, so the user may retry at once
    ctx.mock.set_simulate_failure(false);
    let req = test::TestRequest::post()
        .uri("/api/users/send-email-verification")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert!(body.get("devCode").is_none());
}

#[actix_web::test]
async fn test_verification_routes_require_session() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for (method, uri) in [
        ("POST", "/api/users/send-email-verification"),
        ("GET", "/api/users/email-verification-status"),
        ("POST", "/api/users/verify-email"),
        ("POST", "/api/auth/verify-phone"),
        ("POST", "/api/auth/resend-verification"),
    ] {
        let req = match method {
            "GET" => test::TestRequest::get(),
            _ => test::TestRequest::post(),
        }
        .uri(uri)
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}
