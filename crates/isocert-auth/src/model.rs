//! Authentication models
//!
//! JWT claims, the auth context stored in request extensions and the
//! authenticated caller handed to handlers.

use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const TOKEN_PREFIX: &str = "Bearer ";
pub const ACCESS_TOKEN: &str = "accessToken";
pub const ANONYMOUS_USER: &str = "anonymous";

pub const DEFAULT_TOKEN_EXPIRE_SECONDS: i64 = 691_200;

fn default_true() -> bool {
    true
}

/// JWT payload
///
/// Tokens without the flag claims are treated as active, non-superuser
/// accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtPayload {
    pub sub: String,
    pub exp: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Auth context passed through request extensions
#[derive(Debug, Default, Clone)]
pub struct AuthContext {
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub jwt_error: Option<jsonwebtoken::errors::Error>,
    pub token_provided: bool,
}

impl AuthContext {
    /// Context used when authentication is switched off
    pub fn anonymous_superuser() -> Self {
        Self {
            username: ANONYMOUS_USER.to_string(),
            is_active: true,
            is_superuser: true,
            jwt_error: None,
            token_provided: false,
        }
    }

    /// Context for a successfully decoded token
    pub fn from_claims(claims: &JwtPayload) -> Self {
        Self {
            username: claims.sub.clone(),
            is_active: claims.is_active,
            is_superuser: claims.is_superuser,
            jwt_error: None,
            token_provided: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.username.is_empty() && self.jwt_error.is_none()
    }

    pub fn jwt_error_string(&self) -> String {
        if let Some(e) = &self.jwt_error {
            match e.kind() {
                ErrorKind::ExpiredSignature => "token expired!".to_string(),
                _ => e.to_string(),
            }
        } else {
            String::default()
        }
    }
}

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub username: String,
    pub is_superuser: bool,
}

impl From<&AuthContext> for CurrentUser {
    fn from(value: &AuthContext) -> Self {
        Self {
            username: value.username.clone(),
            is_superuser: value.is_superuser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_flag_defaults() {
        let payload: JwtPayload = serde_json::from_str(r#"{"sub":"alice","exp":10}"#).unwrap();
        assert!(payload.is_active);
        assert!(!payload.is_superuser);
    }

    #[test]
    fn test_anonymous_context_is_superuser() {
        let ctx = AuthContext::anonymous_superuser();
        assert!(ctx.is_authenticated());
        assert!(ctx.is_active);
        assert!(ctx.is_superuser);
        assert_eq!(CurrentUser::from(&ctx).username, ANONYMOUS_USER);
    }

    #[test]
    fn test_default_context_is_not_authenticated() {
        let ctx = AuthContext::default();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.jwt_error_string(), "");
    }

    #[test]
    fn test_expired_error_string() {
        let ctx = AuthContext {
            jwt_error: Some(ErrorKind::ExpiredSignature.into()),
            token_provided: true,
            ..Default::default()
        };
        assert_eq!(ctx.jwt_error_string(), "token expired!");
    }
}
