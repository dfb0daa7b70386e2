// Authentication middleware for Actix-web
// Decodes the bearer token and stores an AuthContext in the request extensions

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::Data,
};

use futures::future::LocalBoxFuture;

use isocert_auth::{ACCESS_TOKEN, AUTHORIZATION_HEADER, AuthContext, TOKEN_PREFIX};

use crate::model::app_state::AppState;

// Authentication middleware transformer
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware { service })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
}

/// Extract token from request using 3 sources in priority order:
/// 1. `Authorization: Bearer <token>` header
/// 2. `accessToken` HTTP header
/// 3. `accessToken` query parameter
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(header_val) = req.headers().get(AUTHORIZATION_HEADER)
        && let Ok(s) = header_val.to_str()
        && let Some(token) = s.trim().strip_prefix(TOKEN_PREFIX)
    {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    if let Some(header_val) = req.headers().get(ACCESS_TOKEN)
        && let Ok(s) = header_val.to_str()
    {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    if let Some(query) = req.uri().query() {
        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=')
                && key == ACCESS_TOKEN
                && !value.is_empty()
            {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Build the auth context for a request
///
/// With authentication disabled every request acts as an active superuser.
fn resolve_auth_context(req: &ServiceRequest, token: Option<String>) -> AuthContext {
    let Some(app_state) = req.app_data::<Data<AppState>>() else {
        tracing::error!("AppState not found in request app_data");
        return AuthContext::default();
    };

    if !app_state.configuration.auth_enabled() {
        return AuthContext::anonymous_superuser();
    }

    let Some(token) = token else {
        return AuthContext::default();
    };

    let secret_key = app_state.configuration.token_secret_key();
    match isocert_auth::service::auth::decode_jwt_token_cached(&token, &secret_key) {
        Ok(claims) => AuthContext::from_claims(&claims),
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer token");
            AuthContext {
                jwt_error: Some(err),
                token_provided: true,
                ..Default::default()
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if Method::OPTIONS != *req.method() {
            let token = extract_token(&req);
            let auth_context = resolve_auth_context(&req, token);

            // Always insert AuthContext so Secured can inspect it
            req.extensions_mut().insert(auth_context);
        }

        let res = self.service.call(req);

        Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_token_prefers_bearer_header() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION_HEADER, "Bearer abc.def.ghi"))
            .insert_header((ACCESS_TOKEN, "other"))
            .to_srv_request();
        assert_eq!(extract_token(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_token_fallbacks() {
        let req = TestRequest::default()
            .insert_header((ACCESS_TOKEN, " header-token "))
            .to_srv_request();
        assert_eq!(extract_token(&req), Some("header-token".to_string()));

        let req = TestRequest::with_uri("/companies/?skip=0&accessToken=query-token")
            .to_srv_request();
        assert_eq!(extract_token(&req), Some("query-token".to_string()));
    }

    #[test]
    fn test_extract_token_ignores_other_schemes() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION_HEADER, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert_eq!(extract_token(&req), None);

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION_HEADER, "Bearer   "))
            .to_srv_request();
        assert_eq!(extract_token(&req), None);
    }
}
