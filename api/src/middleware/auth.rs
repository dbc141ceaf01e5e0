//! Session authentication middleware for protected endpoints.
//!
//! The access token is read from the `Authorization: Bearer` header, or from
//! the session cookie when no header is present. The token is resolved to an
//! active user through the `Authenticator` registered in app data, and the
//! user is stored in the request extensions for the handlers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use sf_core::errors::{AuthError, DomainError};
use sf_core::{Authenticator, User};

use crate::handlers::ApiError;

/// Cookie used when none is configured
pub const DEFAULT_TOKEN_COOKIE: &str = "token";

/// Authenticated user injected into requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl std::ops::Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Session authentication middleware factory
pub struct JwtAuth {
    cookie_name: String,
}

impl JwtAuth {
    /// Creates the middleware reading the default `token` cookie
    pub fn new() -> Self {
        Self::with_cookie(DEFAULT_TOKEN_COOKIE)
    }

    /// Creates the middleware reading a specific cookie
    pub fn with_cookie(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl Default for JwtAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            cookie_name: Rc::from(self.cookie_name.as_str()),
        }))
    }
}

/// Session authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let cookie_name = Rc::clone(&self.cookie_name);

        Box::pin(async move {
            let authenticator = match req.app_data::<web::Data<Arc<dyn Authenticator>>>() {
                Some(authenticator) => authenticator.get_ref().clone(),
                None => {
                    log::error!("Authenticator missing from app data");
                    return Ok(reject(
                        req,
                        DomainError::Internal {
                            message: "Authentication not configured".to_string(),
                        },
                    ));
                }
            };

            let token = extract_bearer_token(&req).or_else(|| extract_cookie_token(&req, &cookie_name));

            let user = match authenticator.authenticate(token.as_deref()).await {
                Ok(user) => user,
                Err(e) => {
                    log::debug!("Rejected request to {}: {}", req.path(), e);
                    return Ok(reject(req, e));
                }
            };

            req.extensions_mut().insert(AuthenticatedUser(user));

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Answers the request with the gate's error response
///
/// Rejections are returned as responses rather than service errors, so outer
/// middleware such as CORS and the logger see a regular 401.
fn reject<B>(req: ServiceRequest, error: DomainError) -> ServiceResponse<EitherBody<B>> {
    let response = ApiError::Gate(error).error_response();
    req.into_response(response).map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the token from the session cookie
fn extract_cookie_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::Gate(AuthError::MissingToken.into()).into());

        ready(result)
    }
}
