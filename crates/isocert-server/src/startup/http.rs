//! HTTP server setup

use std::sync::Arc;

use actix_web::{
    App, HttpRequest, HttpServer,
    dev::Server,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    middleware::{Logger, NormalizePath},
    web,
};

use crate::{
    api::route::routes,
    error::PARAMETER_VALIDATE_ERROR,
    middleware::auth::Authentication,
    model::{app_state::AppState, response::ErrorResult},
};

fn validation_failure(err: impl std::fmt::Display, source: &str) -> actix_web::Error {
    let detail = format!("{source}: {err}");
    tracing::debug!(detail = %detail, "Request rejected");
    InternalError::from_response(
        detail.clone(),
        ErrorResult::http_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            PARAMETER_VALIDATE_ERROR.code,
            detail,
        ),
    )
    .into()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    validation_failure(err, "body")
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    validation_failure(err, "path")
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    validation_failure(err, "query")
}

/// Mount the API under `context_path` with 422 responses for malformed
/// bodies, paths and queries
pub fn configure(cfg: &mut web::ServiceConfig, context_path: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(web::scope(context_path).configure(routes));
}

/// Creates and binds the main HTTP server.
pub fn main_server(
    app_state: Arc<AppState>,
    context_path: String,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    tracing::info!(
        address = %address,
        port = port,
        context_path = %context_path,
        "Starting HTTP server"
    );

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Authentication)
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(web::Data::from(app_state.clone()))
            .configure(|cfg| configure(cfg, &context_path))
    })
    .bind((address, port))?
    .run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_validation_failure_body() {
        let err = validation_failure("invalid UUID", "path");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], PARAMETER_VALIDATE_ERROR.code);
        assert_eq!(body["detail"], "path: invalid UUID");
    }
}
