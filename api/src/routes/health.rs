use actix_web::{web, HttpResponse};

use sf_infra::database::DatabasePool;

/// Health check endpoint handler
///
/// Reports the database as `up` or `down` when a pool is registered in app
/// data; a failing database answers 503 so load balancers stop routing here.
pub async fn health_check(pool: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let database = match pool {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "up",
            Ok(false) | Err(_) => "down",
        },
        None => "not configured",
    };

    let body = serde_json::json!({
        "status": if database == "down" { "unhealthy" } else { "healthy" },
        "service": "storefront-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if database == "down" {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
