//! CORS middleware configuration for the storefront client.
//!
//! In development any origin is accepted. Otherwise only the origins listed in
//! `ServerConfig::allowed_origins` (`ALLOWED_ORIGINS`) may call the API.
//! Credentials are always supported because the session may travel in a cookie.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sf_shared::{Environment, ServerConfig};

const MAX_AGE_SECONDS: usize = 3600;

/// Creates a CORS middleware instance configured for the environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_development() {
        create_development_cors()
    } else {
        create_restricted_cors(&server.allowed_origins)
    }
}

fn base_cors() -> Cors {
    Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(MAX_AGE_SECONDS)
        .supports_credentials()
}

fn create_development_cors() -> Cors {
    log::info!("Configuring CORS for development environment");
    base_cors().allow_any_origin()
}

fn create_restricted_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = base_cors();

    for origin in allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_rt::test]
    async fn test_restricted_cors_allows_configured_origin() {
        let server = ServerConfig {
            allowed_origins: vec!["https://shop.example.com".to_string()],
            ..Default::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &server))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://shop.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://shop.example.com"
        );
    }

    #[actix_rt::test]
    async fn test_development_cors_accepts_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development, &ServerConfig::default()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
