use actix_web::{web, HttpResponse};

use sf_core::domain::entities::verification::VerificationChannel;
use sf_core::repositories::UserRepository;
use sf_core::services::NotificationDispatcher;

use crate::app::AppState;
use crate::dto::SendVerificationResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;

/// Handler for POST /api/auth/resend-verification
///
/// Sends a new phone verification code, replacing the pending one.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Verification code sent",
///     "resendAvailableIn": 60,
///     "devCode": "042917"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: No phone on file, or phone already verified
/// - 429 Too Many Requests: Inside the resend cooldown
/// - 502 Bad Gateway: SMS provider failure (production only)
pub async fn resend_verification<U, N>(
    state: web::Data<AppState<U, N>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let result = state
        .verification_service
        .send_phone_verification(user.id)
        .await?;

    Ok(HttpResponse::Ok().json(SendVerificationResponse {
        success: true,
        message: "Verification code sent".to_string(),
        resend_available_in: state
            .verification_service
            .config()
            .cooldown_seconds(VerificationChannel::Phone),
        dev_code: result.dev_code,
    }))
}
