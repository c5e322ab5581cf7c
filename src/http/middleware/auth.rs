//! Shared-secret gate for protected routes.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::http::pipeline::Interceptor;
use crate::http::response::ApiError;

pub const X_API_KEY: &str = "x-api-key";

/// Lets a request through only when `X-API-Key` equals the configured secret.
///
/// Must sit innermost in its chain so the metrics interceptor sees rejections.
pub struct ApiKeyGate {
    secret: SecretString,
}

impl ApiKeyGate {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Decide on a request without running anything.
    pub fn check(&self, request: &Request) -> Result<(), ApiError> {
        let presented = match request.headers().get(X_API_KEY) {
            Some(value) if !value.is_empty() => value.as_bytes(),
            _ => return Err(ApiError::MissingApiKey),
        };

        let expected = self.secret.expose_secret().as_bytes();
        if bool::from(presented.ct_eq(expected)) {
            Ok(())
        } else {
            Err(ApiError::InvalidApiKey)
        }
    }
}

impl Interceptor for ApiKeyGate {
    fn handle<'a>(&'a self, request: Request, next: Next) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            match self.check(&request) {
                Ok(()) => next.run(request).await,
                Err(err) => {
                    tracing::warn!(
                        method = %request.method(),
                        path = %request.uri().path(),
                        reason = %err,
                        "Rejected unauthenticated request"
                    );
                    err.into_response()
                }
            }
        })
    }
}
