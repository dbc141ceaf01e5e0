use actix_web::{web, HttpResponse};

use sf_core::domain::entities::verification::VerificationChannel;
use sf_core::repositories::UserRepository;
use sf_core::services::NotificationDispatcher;

use crate::app::AppState;
use crate::dto::SendVerificationResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;

/// Handler for POST /api/users/send-email-verification
///
/// Sends a new verification link to the signed-in user's email address.
/// Any earlier link stops working.
///
/// ## Errors
/// - 400 Bad Request: Email already verified
/// - 429 Too Many Requests: Inside the resend cooldown, the message carries
///   the remaining seconds
/// - 502 Bad Gateway: Email provider failure (production only)
pub async fn send_email_verification<U, N>(
    state: web::Data<AppState<U, N>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let result = state
        .verification_service
        .send_email_verification(user.id)
        .await?;

    Ok(HttpResponse::Ok().json(SendVerificationResponse {
        success: true,
        message: "Verification email sent".to_string(),
        resend_available_in: state
            .verification_service
            .config()
            .cooldown_seconds(VerificationChannel::Email),
        dev_code: result.dev_code,
    }))
}
