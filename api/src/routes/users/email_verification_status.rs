use actix_web::{web, HttpResponse};

use sf_core::repositories::UserRepository;
use sf_core::services::NotificationDispatcher;

use crate::app::AppState;
use crate::dto::EmailVerificationStatusResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;

/// Handler for GET /api/users/email-verification-status
pub async fn email_verification_status<U, N>(
    state: web::Data<AppState<U, N>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let status = state.verification_service.status(user.id).await?;

    Ok(HttpResponse::Ok().json(EmailVerificationStatusResponse::from(&status)))
}
