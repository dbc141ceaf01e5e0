use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::repositories::UserRepository;
use sf_core::services::NotificationDispatcher;

use crate::app::AppState;
use crate::dto::{SuccessResponse, VerifyEmailRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;

const VERIFIED_MESSAGE: &str = "Email verified successfully";

/// Handler for POST /api/users/verify-email
///
/// Checks a token for the signed-in user.
///
/// # Request Body
///
/// ```json
/// { "token": "3f9a..." }
/// ```
pub async fn verify_email<U, N>(
    state: web::Data<AppState<U, N>>,
    user: AuthenticatedUser,
    request: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    request.validate()?;

    state
        .verification_service
        .verify_email_token(user.id, &request.token)
        .await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::with_message(VERIFIED_MESSAGE)))
}

/// Handler for GET /api/users/verify-email/{token}
///
/// Target of the link in the verification email; no session required.
pub async fn verify_email_link<U, N>(
    state: web::Data<AppState<U, N>>,
    token: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let user_id = state
        .verification_service
        .verify_email_link(&token)
        .await?;

    log::info!("Email verified through link for user {}", user_id);

    Ok(HttpResponse::Ok().json(SuccessResponse::with_message(VERIFIED_MESSAGE)))
}
