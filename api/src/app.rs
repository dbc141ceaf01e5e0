//! Application state and factory
//!
//! This module holds the shared service handles and builds the Actix-web
//! application. `main` and the integration tests both go through
//! [`create_app`], so the route table exists in one place.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Logger,
    web, App, HttpResponse,
};
use std::sync::Arc;

use sf_core::repositories::UserRepository;
use sf_core::services::{AuthService, Authenticator, NotificationDispatcher, VerificationService};
use sf_shared::{AppConfig, AuthConfig, Environment, ErrorResponse, ServerConfig};

use crate::middleware::{cors::create_cors, JwtAuth};
use crate::routes::{auth, health, users};

/// Application state that holds shared services
pub struct AppState<U, N>
where
    U: UserRepository,
    N: NotificationDispatcher,
{
    pub auth_service: Arc<AuthService<U, N>>,
    pub verification_service: Arc<VerificationService<U, N>>,
    pub auth_config: AuthConfig,
    pub server_config: ServerConfig,
    pub environment: Environment,
}

impl<U, N> AppState<U, N>
where
    U: UserRepository,
    N: NotificationDispatcher,
{
    pub fn new(
        auth_service: Arc<AuthService<U, N>>,
        verification_service: Arc<VerificationService<U, N>>,
        config: &AppConfig,
    ) -> Self {
        Self {
            auth_service,
            verification_service,
            auth_config: config.auth.clone(),
            server_config: config.server.clone(),
            environment: config.environment,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, N>(
    state: web::Data<AppState<U, N>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let cors = create_cors(state.environment, &state.server_config);
    let cookie_name = state.auth_config.cookie_name.clone();
    let authenticator: Arc<dyn Authenticator> = state.auth_service.clone();

    let json_config = web::JsonConfig::default()
        .limit(state.server_config.max_payload_size)
        .error_handler(|err, _req| {
            let message = format!("Invalid request body: {}", err);
            InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse::single(message)),
            )
            .into()
        });

    App::new()
        .app_data(state)
        .app_data(web::Data::new(authenticator))
        .app_data(json_config)
        // Registered last, so the logger is the outermost layer
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::<U, N>))
                        .route("/login", web::post().to(auth::login::<U, N>))
                        .route("/logout", web::post().to(auth::logout::<U, N>))
                        .route(
                            "/me",
                            web::get()
                                .to(auth::me)
                                .wrap(JwtAuth::with_cookie(cookie_name.clone())),
                        )
                        .route(
                            "/verify-phone",
                            web::post()
                                .to(auth::verify_phone::<U, N>)
                                .wrap(JwtAuth::with_cookie(cookie_name.clone())),
                        )
                        .route(
                            "/resend-verification",
                            web::post()
                                .to(auth::resend_verification::<U, N>)
                                .wrap(JwtAuth::with_cookie(cookie_name.clone())),
                        ),
                )
                .service(
                    web::scope("/users")
                        .route(
                            "/send-email-verification",
                            web::post()
                                .to(users::send_email_verification::<U, N>)
                                .wrap(JwtAuth::with_cookie(cookie_name.clone())),
                        )
                        .route(
                            "/email-verification-status",
                            web::get()
                                .to(users::email_verification_status::<U, N>)
                                .wrap(JwtAuth::with_cookie(cookie_name.clone())),
                        )
                        .route(
                            "/verify-email",
                            web::post()
                                .to(users::verify_email::<U, N>)
                                .wrap(JwtAuth::with_cookie(cookie_name)),
                        )
                        .route(
                            "/verify-email/{token}",
                            web::get().to(users::verify_email_link::<U, N>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::single("The requested resource was not found"))
}
