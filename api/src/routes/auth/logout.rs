use actix_web::{web, HttpResponse};

use sf_core::repositories::UserRepository;
use sf_core::services::NotificationDispatcher;

use crate::app::AppState;
use crate::dto::SuccessResponse;

use super::removal_cookie;

/// Handler for POST /api/auth/logout
///
/// Clears the session cookie. Tokens are stateless, so a bearer token held
/// by the client stays valid until it expires.
pub async fn logout<U, N>(state: web::Data<AppState<U, N>>) -> HttpResponse
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    HttpResponse::Ok()
        .cookie(removal_cookie(&state.auth_config))
        .json(SuccessResponse::ok())
}
