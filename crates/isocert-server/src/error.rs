// Error handling for the HTTP layer
// Maps domain errors to the `{"code", "detail"}` response body

use std::fmt::{Display, Formatter};

use actix_web::{HttpResponse, http::StatusCode};

pub use isocert_common::error::{
    ACCESS_DENIED, PARAMETER_VALIDATE_ERROR, RESOURCE_CONFLICT, RESOURCE_NOT_FOUND, SERVER_ERROR,
};
pub use isocert_common::{ErrorCode, IsocertError};

use crate::model::response::ErrorResult;

pub const INTERNAL_SERVER_ERROR_DETAIL: &str = "Internal Server Error";

// Local wrapper for application errors to implement actix-web error handling
// (Cannot impl foreign trait for foreign type due to orphan rules)
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(value: E) -> Self {
        AppError {
            inner: value.into(),
        }
    }
}

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }

    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.downcast_ref::<IsocertError>() {
            Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Some(IsocertError::IllegalArgument(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(IsocertError::AlreadyExists(_)) => StatusCode::CONFLICT,
            Some(IsocertError::AuthError(_)) => StatusCode::UNAUTHORIZED,
            Some(IsocertError::InactiveUser) => StatusCode::BAD_REQUEST,
            Some(IsocertError::AccessDenied) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let Some(e) = self.downcast_ref::<IsocertError>() else {
            tracing::error!(error = ?self.inner, "Unhandled error");
            return ErrorResult::http_response(
                status,
                SERVER_ERROR.code,
                INTERNAL_SERVER_ERROR_DETAIL,
            );
        };

        match e {
            IsocertError::CompanyNotFound
            | IsocertError::QmsTypeNotFound
            | IsocertError::DocumentNotFound
            | IsocertError::ApplicationNotFound
            | IsocertError::GeneratedDocumentNotFound => {
                ErrorResult::http_response(status, RESOURCE_NOT_FOUND.code, e.to_string())
            }
            IsocertError::IllegalArgument(message) => {
                ErrorResult::http_response(status, PARAMETER_VALIDATE_ERROR.code, message)
            }
            IsocertError::AlreadyExists(message) => {
                ErrorResult::http_response(status, RESOURCE_CONFLICT.code, message)
            }
            IsocertError::AuthError(message) => {
                let mut response =
                    ErrorResult::http_response(status, ACCESS_DENIED.code, message);
                response.headers_mut().insert(
                    actix_web::http::header::WWW_AUTHENTICATE,
                    actix_web::http::header::HeaderValue::from_static("Bearer"),
                );
                response
            }
            IsocertError::InactiveUser | IsocertError::AccessDenied => {
                ErrorResult::http_response(status, ACCESS_DENIED.code, e.to_string())
            }
            IsocertError::InternalError(message) => {
                tracing::error!(error = %message, "Internal error");
                ErrorResult::http_response(
                    status,
                    SERVER_ERROR.code,
                    INTERNAL_SERVER_ERROR_DETAIL,
                )
            }
        }
    }
}
