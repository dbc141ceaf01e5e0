use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::repositories::UserRepository;
use sf_core::services::NotificationDispatcher;

use crate::app::AppState;
use crate::dto::{AuthResponse, LoginRequest, UserResponse};
use crate::handlers::ApiError;

use super::session_cookie;

/// Handler for POST /api/auth/login
///
/// Checks the credentials and opens a session. The token is returned in the
/// body and also set as the http-only session cookie.
///
/// ## Errors
/// - 400 Bad Request: Malformed email or empty password
/// - 401 Unauthorized: Unknown email, wrong password or deactivated account
pub async fn login<U, N>(
    state: web::Data<AppState<U, N>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    request.validate()?;

    let outcome = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state.auth_config, &outcome.token))
        .json(AuthResponse {
            token: outcome.token.token.clone(),
            expires_at: outcome.token.expires_at,
            user: UserResponse::from(&outcome.user),
            dev_codes: None,
        }))
}
