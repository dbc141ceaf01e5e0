use actix_web::HttpResponse;

use crate::dto::{MeResponse, UserResponse};
use crate::middleware::AuthenticatedUser;

/// Handler for GET /api/auth/me
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user: UserResponse::from(&user.0),
    })
}
