//! HTTP Basic authentication middleware for protecting API endpoints.
//!
//! Every route requires the configured credentials in the `Authorization`
//! header. CORS preflight requests pass through unauthenticated so browsers
//! can negotiate before sending credentials.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header,
    http::Method,
    Error, HttpResponse,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use pv_shared::types::response::ErrorBody;

/// Basic authentication middleware factory
pub struct BasicAuth {
    user: String,
    pass: String,
}

impl BasicAuth {
    /// Creates a middleware requiring the given credentials
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddleware {
            service: Rc::new(service),
            user: self.user.clone(),
            pass: self.pass.clone(),
        }))
    }
}

/// Basic authentication middleware service
pub struct BasicAuthMiddleware<S> {
    service: Rc<S>,
    user: String,
    pass: String,
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Allow preflight without auth
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let authorized = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| check_credentials(value, &self.user, &self.pass))
            .unwrap_or(false);

        if !authorized {
            return Box::pin(async move { Err(unauthorized_error()) });
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

/// Validate a `Basic <base64>` header value against the configured pair
fn check_credentials(header_value: &str, user: &str, pass: &str) -> bool {
    let Some(encoded) = header_value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = BASE64.decode(encoded) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    match decoded.split_once(':') {
        Some((u, p)) => u == user && p == pass,
        None => false,
    }
}

fn unauthorized_error() -> Error {
    let response = HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, r#"Basic realm="Restricted""#))
        .json(ErrorBody::new("Unauthorized"));
    InternalError::from_response("unauthorized", response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(user: &str, pass: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{}:{}", user, pass)))
    }

    #[test]
    fn test_check_credentials_accepts_configured_pair() {
        assert!(check_credentials(&encode("admin", "secret"), "admin", "secret"));
    }

    #[test]
    fn test_check_credentials_rejects_wrong_pair() {
        assert!(!check_credentials(&encode("admin", "wrong"), "admin", "secret"));
        assert!(!check_credentials(&encode("other", "secret"), "admin", "secret"));
    }

    #[test]
    fn test_check_credentials_rejects_malformed_header() {
        assert!(!check_credentials("Bearer token", "admin", "secret"));
        assert!(!check_credentials("Basic not-base64!!!", "admin", "secret"));

        // Decodes fine but has no colon separator
        let no_colon = format!("Basic {}", BASE64.encode("adminsecret"));
        assert!(!check_credentials(&no_colon, "admin", "secret"));
    }
}
