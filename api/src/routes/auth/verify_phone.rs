use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::repositories::UserRepository;
use sf_core::services::NotificationDispatcher;

use crate::app::AppState;
use crate::dto::{SuccessResponse, VerifyPhoneRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;

/// Handler for POST /api/auth/verify-phone
///
/// # Request Body
///
/// ```json
/// { "verificationCode": "042917" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Code is not six digits, or is wrong or expired
///   (one message for both)
/// - 401 Unauthorized: No valid session
pub async fn verify_phone<U, N>(
    state: web::Data<AppState<U, N>>,
    user: AuthenticatedUser,
    request: web::Json<VerifyPhoneRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    request.validate()?;

    state
        .verification_service
        .verify_phone_code(user.id, &request.verification_code)
        .await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::with_message(
        "Phone number verified successfully",
    )))
}
