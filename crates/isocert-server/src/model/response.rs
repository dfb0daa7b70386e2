//! Response bodies

use actix_web::{HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Error body: `{"code": <int>, "detail": <string>}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResult {
    pub code: i32,
    pub detail: String,
}

impl ErrorResult {
    pub fn new(code: i32, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn http_response(status: StatusCode, code: i32, detail: impl Into<String>) -> HttpResponse {
        HttpResponse::build(status).json(Self::new(code, detail))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageResult {
    pub message: String,
}

impl MessageResult {
    pub fn http_ok(message: &str) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogoUploadResult {
    pub message: String,
    pub file_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub title: String,
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationResult {
    pub message: String,
    pub files: Vec<GeneratedFile>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResult {
    pub status: String,
}
