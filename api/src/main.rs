use actix_web::{web, HttpServer};
use log::{error, info, warn};
use std::sync::Arc;

use sf_api::{config, create_app, AppState};
use sf_core::services::{AuthService, TokenService, VerificationService};
use sf_infra::database::{DatabasePool, MySqlUserRepository};
use sf_infra::notify::create_notifier;

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let environment = config::load_env_files();

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(environment.default_log_filter()),
    );

    info!("Starting Storefront API Server ({})", environment);

    let config = config::load_config().map_err(|problems| {
        for problem in &problems.0 {
            error!("{}", problem);
        }
        startup_error(problems)
    })?;

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }
    if config.verification.expose_dev_codes {
        warn!("Verification codes will be echoed in API responses");
    }

    // Database
    let pool = DatabasePool::new(config.database.clone())
        .await
        .map_err(startup_error)?;
    pool.ensure_schema().await.map_err(startup_error)?;
    info!("Database ready: {}", pool.get_statistics());

    // Notification providers
    let notifier = create_notifier(
        &config.notification,
        &config.verification,
        config.environment.is_production(),
    )
    .map_err(startup_error)?;
    info!(
        "Notification providers: email={}, sms={}",
        notifier.email_provider(),
        notifier.sms_provider()
    );

    // Services
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let verification_service = Arc::new(VerificationService::new(
        user_repository.clone(),
        Arc::new(notifier),
        (&config.verification).into(),
    ));
    let token_service = Arc::new(TokenService::new((&config.auth.jwt).into()));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        verification_service.clone(),
        token_service,
        (&config.auth).into(),
    ));

    let state = web::Data::new(AppState::new(auth_service, verification_service, &config));

    let bind_address = (config.server.host.clone(), config.server.port);
    info!("Server will bind to: {}:{}", bind_address.0, bind_address.1);

    let health_pool = web::Data::new(pool.clone());
    let mut server =
        HttpServer::new(move || create_app(state.clone()).app_data(health_pool.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server.bind(bind_address)?.run().await;

    pool.close().await;
    result
}
