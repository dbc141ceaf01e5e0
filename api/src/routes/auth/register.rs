use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::repositories::UserRepository;
use sf_core::services::{NotificationDispatcher, RegisterInput};
use sf_shared::email::mask_email;

use crate::app::AppState;
use crate::dto::{AuthResponse, DevCodesResponse, RegisterRequest, UserResponse};
use crate::handlers::ApiError;

use super::session_cookie;

/// Handler for POST /api/auth/register
///
/// Creates an account, sends the email verification link (and a phone code
/// when a phone number is given) and opens a session.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Sam Shopper",
///     "email": "sam@example.com",
///     "password": "hunter22",
///     "phone": "+14155552671"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "token": "eyJhbGciOiJIUzI1NiJ9...",
///     "expiresAt": "2024-07-01T10:00:00Z",
///     "user": { "id": "...", "email": "sam@example.com", "emailVerified": false },
///     "devCodes": { "email": "3f9a...", "phone": "042917" }
/// }
/// ```
///
/// `devCodes` is only present outside production.
///
/// ## Errors
/// - 400 Bad Request: Invalid name, email, password or phone
/// - 409 Conflict: Email already registered
pub async fn register<U, N>(
    state: web::Data<AppState<U, N>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    log::info!("Registration request for {}", mask_email(&request.email));

    let outcome = state
        .auth_service
        .register(RegisterInput {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
        })
        .await?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(&state.auth_config, &outcome.token))
        .json(AuthResponse {
            token: outcome.token.token.clone(),
            expires_at: outcome.token.expires_at,
            user: UserResponse::from(&outcome.user),
            dev_codes: DevCodesResponse::from_codes(&outcome.dev_codes),
        }))
}
