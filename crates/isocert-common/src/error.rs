//! Error types and error codes for isocert
//!
//! This module defines:
//! - `IsocertError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

/// Application-specific error types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IsocertError {
    #[error("Company not found")]
    CompanyNotFound,

    #[error("QMS type not found")]
    QmsTypeNotFound,

    #[error("Document not found")]
    DocumentNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    #[error("Generated document not found")]
    GeneratedDocumentNotFound,

    #[error("{0}")]
    IllegalArgument(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    AuthError(String),

    #[error("Inactive user")]
    InactiveUser,

    #[error("The user doesn't have enough privileges")]
    AccessDenied,

    #[error("internal error: {0}")]
    InternalError(String),
}

impl IsocertError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IsocertError::CompanyNotFound
                | IsocertError::QmsTypeNotFound
                | IsocertError::DocumentNotFound
                | IsocertError::ApplicationNotFound
                | IsocertError::GeneratedDocumentNotFound
        )
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const ACCESS_DENIED: ErrorCode<'static> = ErrorCode {
    code: 10001,
    message: "access denied",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};
