//! Liveness endpoint backed by the storage health check

use actix_web::{HttpResponse, Scope, get, web};

use crate::model::{app_state::AppState, response::HealthResult};

const STATUS_UP: &str = "UP";
const STATUS_DOWN: &str = "DOWN";

#[get("")]
async fn health(data: web::Data<AppState>) -> HttpResponse {
    match data.persistence.health_check().await {
        Ok(()) => HttpResponse::Ok().json(HealthResult {
            status: STATUS_UP.to_string(),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            HttpResponse::ServiceUnavailable().json(HealthResult {
                status: STATUS_DOWN.to_string(),
            })
        }
    }
}

pub fn routes() -> Scope {
    web::scope("/health").service(health)
}
