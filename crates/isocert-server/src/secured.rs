// Access control for API handlers

use actix_web::{HttpMessage, HttpRequest};

use isocert_auth::{AuthContext, CurrentUser};
use isocert_common::IsocertError;

use crate::model::constants::COULD_NOT_VALIDATE_CREDENTIALS;

// Security requirement of a single request
#[derive(Debug, Clone)]
pub struct Secured<'a> {
    pub req: &'a HttpRequest, // HTTP request reference
    pub superuser: bool,      // Whether the caller must be a superuser
}

impl<'a> Secured<'a> {
    pub fn builder(req: &'a HttpRequest) -> SecuredBuilder<'a> {
        SecuredBuilder::new(req)
    }

    /// Resolve the caller from the context left by the authentication
    /// middleware and check it against the requirement.
    pub fn authorize(&self) -> Result<CurrentUser, IsocertError> {
        let auth_context = self.req.extensions().get::<AuthContext>().cloned();

        let auth_context = match auth_context {
            Some(ctx) if ctx.is_authenticated() => ctx,
            Some(ctx) => {
                if ctx.token_provided {
                    tracing::debug!(
                        path = self.req.path(),
                        error = %ctx.jwt_error_string(),
                        "Invalid token"
                    );
                }
                return Err(IsocertError::AuthError(
                    COULD_NOT_VALIDATE_CREDENTIALS.to_string(),
                ));
            }
            None => {
                tracing::warn!(path = self.req.path(), "No auth context found");
                return Err(IsocertError::AuthError(
                    COULD_NOT_VALIDATE_CREDENTIALS.to_string(),
                ));
            }
        };

        if !auth_context.is_active {
            return Err(IsocertError::InactiveUser);
        }

        if self.superuser && !auth_context.is_superuser {
            tracing::info!(
                username = %auth_context.username,
                path = self.req.path(),
                "Superuser privileges required"
            );
            return Err(IsocertError::AccessDenied);
        }

        Ok(CurrentUser::from(&auth_context))
    }
}

#[derive(Debug, Clone)]
pub struct SecuredBuilder<'a> {
    req: &'a HttpRequest,
    superuser: bool,
}

impl<'a> SecuredBuilder<'a> {
    pub fn new(req: &'a HttpRequest) -> Self {
        SecuredBuilder::<'a> {
            req,
            superuser: false,
        }
    }

    pub fn superuser(mut self) -> Self {
        self.superuser = true;
        self
    }

    pub fn build(self) -> Secured<'a> {
        Secured::<'a> {
            req: self.req,
            superuser: self.superuser,
        }
    }
}
