//! Shared-secret authorization check.

use std::sync::Arc;

use http::header::{AUTHORIZATION, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderValue, StatusCode};
use tracing::debug;

use super::Middleware;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The `Authorization` value accepted when no other is configured.
pub const DEFAULT_TOKEN: &str = "Bearer token";

/// Rejects every request whose `Authorization` header is not exactly the
/// expected value.
///
/// The comparison is a case-sensitive string equality on the whole header
/// value. A missing header, or one that is not visible ASCII, is a mismatch.
/// Rejected requests get `401` with body `Unauthorized\n` and never reach the
/// next handler. Accepted requests are passed on untouched.
#[derive(Clone, Debug)]
pub struct RequireAuth {
    expected: Arc<str>,
}

impl RequireAuth {
    pub fn new(expected: impl Into<Arc<str>>) -> Self {
        Self { expected: expected.into() }
    }
}

impl Default for RequireAuth {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN)
    }
}

impl Middleware for RequireAuth {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        let expected = Arc::clone(&self.expected);
        (move |req: Request| {
            let authorized = req.header(AUTHORIZATION.as_str()) == Some(&*expected);
            let next = next.clone();
            async move {
                if !authorized {
                    debug!(method = %req.method(), path = %req.path(), "unauthorized request");
                    return unauthorized();
                }
                next.call(req).await
            }
        })
        .into_boxed_handler()
    }
}

fn unauthorized() -> Response {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"))
        .text("Unauthorized\n")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Echoes the `Authorization` header and counts how often it ran.
    fn counting(hits: &Arc<AtomicUsize>) -> BoxedHandler {
        let hits = Arc::clone(hits);
        (move |req: Request| {
            hits.fetch_add(1, Ordering::SeqCst);
            let seen = req.header("authorization").unwrap_or_default().to_owned();
            async move { seen }
        })
        .into_boxed_handler()
    }

    fn with_auth(value: &'static str) -> Request {
        Request::get("/api/v1/users/42")
            .with_header(AUTHORIZATION, HeaderValue::from_static(value))
    }

    #[tokio::test]
    async fn exact_token_is_passed_through_untouched() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = RequireAuth::default().wrap(counting(&hits));

        let res = app.call(with_auth("Bearer token")).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"Bearer token");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = RequireAuth::default().wrap(counting(&hits));

        let res = app.call(Request::get("/api/v1/users/42")).await;

        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.body(), b"Unauthorized\n");
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.header("x-content-type-options"), Some("nosniff"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn near_misses_are_rejected() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = RequireAuth::default().wrap(counting(&hits));

        for value in ["bearer token", "Bearer Token", "Bearer token ", "token", "Basic dG9rZW4=", ""] {
            let res = app.call(with_auth(value)).await;
            assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED, "{value:?}");
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn configured_secret_replaces_default() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = RequireAuth::new("Bearer s3cret").wrap(counting(&hits));

        let rejected = app.call(with_auth("Bearer token")).await;
        let accepted = app.call(with_auth("Bearer s3cret")).await;

        assert_eq!(rejected.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(accepted.status_code(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
